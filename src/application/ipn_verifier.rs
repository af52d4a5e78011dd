use crate::domain::ipn::{CheckFailure, IpnMessage, IpnPayload};
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{EventNotifierRef, HttpVerifierRef, OrderBridgeRef, TransactionLogBox};
use crate::error::{PaymentError, Result};
use tracing::{error, info, instrument, warn};

/// Exact body PayPal returns for an authentic notification.
pub const VERIFIED: &str = "VERIFIED";

/// Result of an accepted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpnOutcome {
    /// Payment confirmed; `order_success` was emitted.
    Completed,
    /// The transaction had already been settled by an earlier delivery.
    Duplicate,
}

/// Validates IPN callbacks and classifies their outcome.
///
/// A notification is a successful payment only when PayPal confirms it,
/// amount and currency match the order, and the status is `Completed`.
pub struct IpnVerifier {
    orders: OrderBridgeRef,
    notifier: EventNotifierRef,
    verifier: HttpVerifierRef,
    transactions: TransactionLogBox,
}

impl IpnVerifier {
    pub fn new(
        orders: OrderBridgeRef,
        notifier: EventNotifierRef,
        verifier: HttpVerifierRef,
        transactions: TransactionLogBox,
    ) -> Self {
        Self {
            orders,
            notifier,
            verifier,
            transactions,
        }
    }

    /// Processes the notification for `order_id`.
    ///
    /// The order id comes from the callback URL, never from the body.
    /// Missing required parameters fail before the order is looked up.
    /// A verified payment always ends in `order_success`, even when its
    /// transaction could not be written to the log.
    #[instrument(skip(self, payload))]
    pub async fn process(&self, order_id: &OrderId, payload: &IpnPayload) -> Result<IpnOutcome> {
        let message = IpnMessage::parse(payload)?;

        let order = self
            .orders
            .find_order(order_id)
            .await?
            .ok_or_else(|| PaymentError::OrderNotFound(order_id.clone()))?;

        self.notifier.order_done(&order, &message).await;

        let mut failures = Vec::new();
        if let Some(failure) = self.check_authenticity(payload).await {
            failures.push(failure);
        }
        failures.extend(check_amount(&order, &message));
        if !message.is_completed() {
            failures.push(CheckFailure::StatusNotCompleted(message.payment_status.clone()));
        }

        if !failures.is_empty() {
            self.notifier.order_fail(&order, &message).await;
            return Err(PaymentError::PaymentFailed(failures));
        }

        if let Some(txn_id) = message.txn_id.as_deref() {
            match self.transactions.record(txn_id, &order.id).await {
                Ok(true) => {}
                Ok(false) => {
                    info!(%order_id, txn_id, "Duplicate IPN for settled transaction ignored");
                    return Ok(IpnOutcome::Duplicate);
                }
                // The payment is verified; a lost log entry only weakens duplicate detection
                Err(err) => {
                    error!(%order_id, txn_id, error = %err, "Settled transaction could not be recorded");
                }
            }
        }

        self.notifier.order_success(&order, &message).await;
        Ok(IpnOutcome::Completed)
    }

    async fn check_authenticity(&self, payload: &IpnPayload) -> Option<CheckFailure> {
        match self.verifier.verify(payload).await {
            Ok(body) if body == VERIFIED => None,
            Ok(body) => Some(CheckFailure::NotVerified(format!("PayPal answered {body:?}"))),
            Err(err) => {
                warn!(error = %err, "IPN verification round-trip failed");
                Some(CheckFailure::NotVerified(err.to_string()))
            }
        }
    }
}

fn check_amount(order: &Order, message: &IpnMessage) -> Vec<CheckFailure> {
    let mut failures = Vec::new();

    let expected = order.amount.to_major();
    if message.mc_gross != Some(expected) {
        failures.push(CheckFailure::AmountMismatch {
            expected,
            received: message.mc_gross,
        });
    }

    if message.mc_currency.as_deref() != Some(order.currency.as_str()) {
        failures.push(CheckFailure::CurrencyMismatch {
            expected: order.currency.clone(),
            received: message.mc_currency.clone(),
        });
    }

    failures
}
