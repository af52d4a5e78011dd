//! Checkout domain: orders, money, the redirect form, IPN messages and the
//! ports through which the host application is reached.

pub mod checkout;
pub mod currency;
pub mod ipn;
pub mod money;
pub mod order;
pub mod ports;
