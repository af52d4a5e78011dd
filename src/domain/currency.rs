use crate::error::{PaymentError, Result};

/// ISO 4217 codes accepted by PayPal Web Checkout.
pub const SUPPORTED_CURRENCIES: [&str; 25] = [
    "AUD", "BRL", "CAD", "CZK", "DKK", //
    "EUR", "HKD", "HUF", "ILS", "JPY", //
    "MYR", "MXN", "NOK", "NZD", "PHP", //
    "PLN", "GBP", "RUB", "SGD", "SEK", //
    "CHF", "TWD", "THB", "TRY", "USD",
];

/// Returns the code unchanged when PayPal accepts it.
///
/// Matching is exact: `"usd"` is rejected.
pub fn check_currency(code: &str) -> Result<&str> {
    if SUPPORTED_CURRENCIES.contains(&code) {
        Ok(code)
    } else {
        Err(PaymentError::CurrencyNotSupported(code.to_string()))
    }
}
