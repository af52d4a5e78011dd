//! Application layer: the two checkout use cases.
//!
//! `CheckoutFormBuilder` sends the buyer to PayPal; `IpnVerifier` handles
//! PayPal's asynchronous answer. Both reach the host application only through
//! the ports in [`crate::domain::ports`], injected at construction.

pub mod form_builder;
pub mod ipn_verifier;
