//! Instant Payment Notification messages.
//!
//! PayPal posts IPN variables as an url-encoded body. The raw body is kept
//! verbatim in [`IpnPayload`] because the authenticity check must echo it back
//! byte for byte; [`IpnMessage`] is the typed view the rest of the crate uses.

use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Variables without which a notification cannot be matched to an outcome.
pub const REQUIRED_PARAMETERS: [&str; 2] = ["item_number", "payment_status"];

/// The body of an IPN callback exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpnPayload {
    raw: String,
    pairs: Vec<(String, String)>,
}

impl IpnPayload {
    pub fn from_body(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect();
        Self { raw, pairs }
    }

    /// Builds a payload from already decoded pairs, encoding them in order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        Self::from_body(raw)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// First value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }

    fn decimal(&self, key: &str) -> Option<Decimal> {
        self.get(key).and_then(|v| Decimal::from_str(v.trim()).ok())
    }

    /// Keys of [`REQUIRED_PARAMETERS`] absent from the payload.
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_PARAMETERS
            .iter()
            .filter(|key| self.get(key).is_none())
            .map(|key| key.to_string())
            .collect()
    }
}

/// Value of the `payment_status` IPN variable.
///
/// Parsing is case-sensitive; anything PayPal does not document lands in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    CanceledReversal,
    Completed,
    Created,
    Denied,
    Expired,
    Failed,
    Pending,
    Refunded,
    Reversed,
    Processed,
    Voided,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CanceledReversal => "Canceled_Reversal",
            Self::Completed => "Completed",
            Self::Created => "Created",
            Self::Denied => "Denied",
            Self::Expired => "Expired",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
            Self::Refunded => "Refunded",
            Self::Reversed => "Reversed",
            Self::Processed => "Processed",
            Self::Voided => "Voided",
            Self::Other(status) => status,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(status: &str) -> Self {
        match status {
            "Canceled_Reversal" => Self::CanceledReversal,
            "Completed" => Self::Completed,
            "Created" => Self::Created,
            "Denied" => Self::Denied,
            "Expired" => Self::Expired,
            "Failed" => Self::Failed,
            "Pending" => Self::Pending,
            "Refunded" => Self::Refunded,
            "Reversed" => Self::Reversed,
            "Processed" => Self::Processed,
            "Voided" => Self::Voided,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of an IPN callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpnMessage {
    pub item_number: String,
    pub payment_status: PaymentStatus,
    pub mc_gross: Option<Decimal>,
    pub mc_currency: Option<String>,
    pub mc_fee: Option<Decimal>,
    pub pending_reason: Option<String>,
    pub payment_type: Option<String>,
    pub payment_date: Option<String>,
    pub txn_id: Option<String>,
    pub txn_type: Option<String>,
    pub item_name: Option<String>,
    pub business: Option<String>,
    pub receiver_email: Option<String>,
    pub receiver_id: Option<String>,
    pub payer_id: Option<String>,
    pub payer_email: Option<String>,
    pub payer_status: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub custom: Option<String>,
    pub invoice: Option<String>,
    pub verify_sign: Option<String>,
    pub test_ipn: bool,
}

impl IpnMessage {
    /// Parses the payload, failing with every missing required key at once.
    pub fn parse(payload: &IpnPayload) -> Result<Self> {
        let missing = payload.missing_required();
        if !missing.is_empty() {
            return Err(PaymentError::ParameterNotReceived(missing));
        }

        Ok(Self {
            item_number: payload.owned("item_number").unwrap_or_default(),
            payment_status: payload
                .get("payment_status")
                .map(PaymentStatus::from)
                .unwrap_or_else(|| PaymentStatus::Other(String::new())),
            mc_gross: payload.decimal("mc_gross"),
            mc_currency: payload.owned("mc_currency"),
            mc_fee: payload.decimal("mc_fee"),
            pending_reason: payload.owned("pending_reason"),
            payment_type: payload.owned("payment_type"),
            payment_date: payload.owned("payment_date"),
            txn_id: payload.owned("txn_id"),
            txn_type: payload.owned("txn_type"),
            item_name: payload.owned("item_name"),
            business: payload.owned("business"),
            receiver_email: payload.owned("receiver_email"),
            receiver_id: payload.owned("receiver_id"),
            payer_id: payload.owned("payer_id"),
            payer_email: payload.owned("payer_email"),
            payer_status: payload.owned("payer_status"),
            first_name: payload.owned("first_name"),
            last_name: payload.owned("last_name"),
            custom: payload.owned("custom"),
            invoice: payload.owned("invoice"),
            verify_sign: payload.owned("verify_sign"),
            test_ipn: payload.get("test_ipn") == Some("1"),
        })
    }

    pub fn is_completed(&self) -> bool {
        self.payment_status == PaymentStatus::Completed
    }
}

/// A single reason an IPN was not accepted as a successful payment.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckFailure {
    /// PayPal did not answer `VERIFIED`, or could not be reached.
    NotVerified(String),
    AmountMismatch {
        expected: Decimal,
        received: Option<Decimal>,
    },
    CurrencyMismatch {
        expected: String,
        received: Option<String>,
    },
    StatusNotCompleted(PaymentStatus),
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotVerified(reason) => write!(f, "notification not verified ({reason})"),
            Self::AmountMismatch { expected, received } => match received {
                Some(received) => write!(f, "amount mismatch: expected {expected}, got {received}"),
                None => write!(f, "amount mismatch: expected {expected}, got nothing"),
            },
            Self::CurrencyMismatch { expected, received } => match received {
                Some(received) => {
                    write!(f, "currency mismatch: expected {expected}, got {received}")
                }
                None => write!(f, "currency mismatch: expected {expected}, got nothing"),
            },
            Self::StatusNotCompleted(status) => write!(f, "payment status is {status}"),
        }
    }
}
