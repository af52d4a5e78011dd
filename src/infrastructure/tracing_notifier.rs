use crate::domain::ipn::IpnMessage;
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::EventNotifier;
use async_trait::async_trait;
use tracing::{error, info};

/// Event notifier that reports every payment event as a structured log line.
///
/// Used by the standalone server, where no host dispatcher is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl EventNotifier for TracingNotifier {
    async fn order_load(&self, order_id: &OrderId) {
        info!(%order_id, "[PAYMENT] Order load");
    }

    async fn order_created(&self, order: &Order) {
        info!(
            order_id = %order.id,
            amount = %order.amount,
            currency = %order.currency,
            "[PAYMENT] Order created"
        );
    }

    async fn order_done(&self, order: &Order, message: &IpnMessage) {
        info!(
            order_id = %order.id,
            txn_id = message.txn_id.as_deref().unwrap_or_default(),
            payment_status = %message.payment_status,
            test_ipn = message.test_ipn,
            "[PAYMENT] Paypal notification received"
        );
    }

    async fn order_success(&self, order: &Order, message: &IpnMessage) {
        info!(
            order_id = %order.id,
            txn_id = message.txn_id.as_deref().unwrap_or_default(),
            "[PAYMENT] Paypal payment success"
        );
    }

    async fn order_fail(&self, order: &Order, message: &IpnMessage) {
        error!(
            order_id = %order.id,
            txn_id = message.txn_id.as_deref().unwrap_or_default(),
            "[PAYMENT] Paypal payment error"
        );
    }
}
