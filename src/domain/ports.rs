use super::ipn::{IpnMessage, IpnPayload};
use super::order::{Order, OrderId};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Access to the host application's orders.
#[async_trait]
pub trait OrderBridge: Send + Sync {
    async fn find_order(&self, order_id: &OrderId) -> Result<Option<Order>>;
}

/// Receives the payment lifecycle events of the checkout.
///
/// Implementations are the host's event dispatcher; anything durable
/// (marking an order paid, sending mail) happens on their side.
#[async_trait]
pub trait EventNotifier: Send + Sync {
    /// The checkout is about to look the order up.
    async fn order_load(&self, order_id: &OrderId);
    /// The order exists and a redirect form is being built for it.
    async fn order_created(&self, order: &Order);
    /// An IPN for the order was received; its outcome is not known yet.
    async fn order_done(&self, order: &Order, message: &IpnMessage);
    async fn order_success(&self, order: &Order, message: &IpnMessage);
    async fn order_fail(&self, order: &Order, message: &IpnMessage);
}

/// Builds the absolute callback URLs PayPal sends the buyer and the IPN to.
pub trait UrlFactory: Send + Sync {
    fn return_url(&self, order_id: &OrderId) -> Result<Url>;
    fn cancel_return_url(&self, order_id: &OrderId) -> Result<Url>;
    fn notify_url(&self, order_id: &OrderId) -> Result<Url>;
}

/// Transport for the IPN authenticity round-trip.
///
/// Returns PayPal's response body; deciding whether it means "verified"
/// is left to the caller.
#[async_trait]
pub trait HttpVerifier: Send + Sync {
    async fn verify(&self, payload: &IpnPayload) -> Result<String>;
}

/// Record of PayPal transactions already settled, keyed by `txn_id`.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// Records the transaction. Returns `false` if it was already recorded.
    async fn record(&self, txn_id: &str, order_id: &OrderId) -> Result<bool>;
}

pub type OrderBridgeRef = Arc<dyn OrderBridge>;
pub type EventNotifierRef = Arc<dyn EventNotifier>;
pub type UrlFactoryRef = Arc<dyn UrlFactory>;
pub type HttpVerifierRef = Arc<dyn HttpVerifier>;
pub type TransactionLogBox = Box<dyn TransactionLog>;
