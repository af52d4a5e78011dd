use crate::domain::ipn::CheckFailure;
use crate::domain::money::MinorUnits;
use crate::domain::order::OrderId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),
    #[error("Parameter not received: {}", .0.join(", "))]
    ParameterNotReceived(Vec<String>),
    #[error("Currency not supported: {0}")]
    CurrencyNotSupported(String),
    #[error(
        "Cart of order {order_id} charges {}, but the order amount is {expected}",
        format_total(.charged)
    )]
    CartMismatch {
        order_id: OrderId,
        expected: MinorUnits,
        /// `None` when the cart total overflows.
        charged: Option<MinorUnits>,
    },
    #[error("Payment failed: {}", format_failures(.0))]
    PaymentFailed(Vec<CheckFailure>),
    #[error("Verification request failed: {0}")]
    Verification(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

fn format_total(total: &Option<MinorUnits>) -> String {
    match total {
        Some(total) => total.to_string(),
        None => "an out-of-range total".to_string(),
    }
}

fn format_failures(failures: &[CheckFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PaymentError {
    fn from(err: rocksdb::Error) -> Self {
        PaymentError::InternalError(Box::new(err))
    }
}
