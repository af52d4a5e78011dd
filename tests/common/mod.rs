#![allow(dead_code)]

use paypal_web_checkout::application::form_builder::{CheckoutFormBuilder, FormSettings};
use paypal_web_checkout::application::ipn_verifier::IpnVerifier;
use paypal_web_checkout::config::CheckoutRoutes;
use paypal_web_checkout::domain::checkout::PaypalEnvironment;
use paypal_web_checkout::domain::ipn::IpnPayload;
use paypal_web_checkout::domain::money::MinorUnits;
use paypal_web_checkout::domain::order::{CartLine, Order};
use paypal_web_checkout::infrastructure::in_memory::{InMemoryOrderBridge, InMemoryTransactionLog};
use paypal_web_checkout::infrastructure::test_doubles::{FixedResponseVerifier, RecordingNotifier};
use paypal_web_checkout::infrastructure::url_factory::RouteUrlFactory;
use paypal_web_checkout::interfaces::http::AppState;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const BUSINESS: &str = "merchant@example.com";
pub const BASE_URL: &str = "https://shop.example.com";

/// Everything a test needs to drive the checkout and observe its events.
pub struct Harness {
    pub orders: InMemoryOrderBridge,
    pub notifier: Arc<RecordingNotifier>,
    pub verifier: Arc<FixedResponseVerifier>,
    pub form_builder: CheckoutFormBuilder,
    pub ipn_verifier: IpnVerifier,
}

impl Harness {
    pub async fn new(paypal_answer: &str) -> Self {
        let orders = InMemoryOrderBridge::new();
        orders.insert(usd_order()).await;
        orders.insert(cart_order()).await;
        orders
            .insert(Order::new("bitcoin", MinorUnits::new(1000), "XBT"))
            .await;
        orders.insert(short_cart_order()).await;

        let notifier = Arc::new(RecordingNotifier::new());
        let verifier = Arc::new(FixedResponseVerifier::new(paypal_answer));
        let urls = Arc::new(RouteUrlFactory::with_default_routes(BASE_URL).unwrap());

        let form_builder = CheckoutFormBuilder::new(
            Arc::new(orders.clone()),
            notifier.clone(),
            urls,
            FormSettings {
                business: BUSINESS.to_string(),
                environment: PaypalEnvironment::Sandbox,
                locale: "en_US".to_string(),
            },
        );
        let ipn_verifier = IpnVerifier::new(
            Arc::new(orders.clone()),
            notifier.clone(),
            verifier.clone(),
            Box::new(InMemoryTransactionLog::new()),
        );

        Self {
            orders,
            notifier,
            verifier,
            form_builder,
            ipn_verifier,
        }
    }

    pub fn into_state(self) -> (AppState, Arc<RecordingNotifier>) {
        let state = AppState {
            form_builder: Arc::new(self.form_builder),
            ipn_verifier: Arc::new(self.ipn_verifier),
            routes: CheckoutRoutes::default(),
        };
        (state, self.notifier)
    }
}

/// Order `42`: 10.00 USD, no cart.
pub fn usd_order() -> Order {
    Order::new("42", MinorUnits::new(1000), "USD")
}

/// Order `77`: two cart lines and a cart discount, 25.00 EUR in total.
pub fn cart_order() -> Order {
    Order::new("77", MinorUnits::new(2500), "EUR")
        .with_line(CartLine::new("Mug", MinorUnits::new(1200), 1))
        .with_line(CartLine::new("Tea", MinorUnits::new(850), 2))
        .with_discount(MinorUnits::new(400))
}

/// Order `short`: charges 10.00 USD but its cart only adds up to 5.00.
pub fn short_cart_order() -> Order {
    Order::new("short", MinorUnits::new(1000), "USD")
        .with_line(CartLine::new("Mug", MinorUnits::new(500), 1))
}

pub fn ipn(gross: &str, currency: &str, status: &str, txn_id: &str) -> IpnPayload {
    IpnPayload::from_pairs([
        ("mc_gross", gross),
        ("mc_currency", currency),
        ("payment_status", status),
        ("item_number", "42"),
        ("txn_id", txn_id),
        ("receiver_email", BUSINESS),
    ])
}

pub fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}
