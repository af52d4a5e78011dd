use crate::application::form_builder::FormSettings;
use crate::domain::checkout::PaypalEnvironment;
use crate::infrastructure::paypal_client::DEFAULT_VERIFY_TIMEOUT;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOCALE: &str = "en_US";

/// Paths of the checkout routes and the query parameter carrying the order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRoutes {
    pub execute: String,
    pub success: String,
    pub fail: String,
    pub process: String,
    pub order_field: String,
}

impl Default for CheckoutRoutes {
    fn default() -> Self {
        Self {
            execute: "/payment/paypal_web_checkout/execute".to_string(),
            success: "/payment/paypal_web_checkout/ok".to_string(),
            fail: "/payment/paypal_web_checkout/ko".to_string(),
            process: "/payment/paypal_web_checkout/process".to_string(),
            order_field: "order_id".to_string(),
        }
    }
}

/// Everything the checkout needs to know about the merchant and deployment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub business: String,
    pub environment: PaypalEnvironment,
    /// Public base URL the shop is reachable at; callback URLs hang off it.
    pub base_url: String,
    pub locale: String,
    pub routes: CheckoutRoutes,
    pub verify_timeout: Duration,
}

impl Settings {
    pub fn new(business: impl Into<String>, environment: PaypalEnvironment) -> Self {
        Self {
            business: business.into(),
            environment,
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            routes: CheckoutRoutes::default(),
            verify_timeout: DEFAULT_VERIFY_TIMEOUT,
        }
    }

    pub fn form_settings(&self) -> FormSettings {
        FormSettings {
            business: self.business.clone(),
            environment: self.environment,
            locale: self.locale.clone(),
        }
    }
}
