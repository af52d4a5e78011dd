use crate::domain::checkout::PaypalEnvironment;
use crate::domain::ipn::IpnPayload;
use crate::domain::ports::HttpVerifier;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Command PayPal expects in front of an echoed notification.
pub const NOTIFY_VALIDATE_CMD: &str = "cmd=_notify-validate";

pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts notifications back to PayPal's `cgi-bin/webscr` endpoint.
///
/// The body is `cmd=_notify-validate` followed by the notification exactly
/// as received. Requests are bounded by a timeout; a timeout surfaces as
/// [`PaymentError::Verification`] like any other transport failure.
#[derive(Debug, Clone)]
pub struct PaypalIpnClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PaypalIpnClient {
    pub fn new(environment: PaypalEnvironment, timeout: Duration) -> Result<Self> {
        Self::with_endpoint(environment.webscr_url(), timeout)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PaymentError::InternalError(Box::new(e)))?;

        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Request body for the validation round-trip.
pub fn validation_body(payload: &IpnPayload) -> String {
    if payload.raw().is_empty() {
        NOTIFY_VALIDATE_CMD.to_string()
    } else {
        format!("{NOTIFY_VALIDATE_CMD}&{}", payload.raw())
    }
}

#[async_trait]
impl HttpVerifier for PaypalIpnClient {
    async fn verify(&self, payload: &IpnPayload) -> Result<String> {
        debug!(endpoint = %self.endpoint, "Validating IPN with PayPal");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(validation_body(payload))
            .send()
            .await
            .map_err(|e| PaymentError::Verification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::Verification(format!(
                "PayPal answered with status {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PaymentError::Verification(e.to_string()))
    }
}
