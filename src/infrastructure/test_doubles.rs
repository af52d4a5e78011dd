//! Test doubles for the notifier and verifier ports.
//!
//! Compiled for unit tests and behind the `test-utils` feature.

use crate::domain::ipn::{IpnMessage, IpnPayload};
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{EventNotifier, HttpVerifier};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An event observed by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    OrderLoad(OrderId),
    OrderCreated(OrderId),
    OrderDone(OrderId),
    OrderSuccess(OrderId),
    OrderFail(OrderId),
}

impl PaymentEvent {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::OrderSuccess(_))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::OrderFail(_))
    }
}

/// Event notifier that remembers every event in emission order.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    events: Arc<RwLock<Vec<PaymentEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<PaymentEvent> {
        self.events.read().await.clone()
    }

    pub async fn count(&self, predicate: impl Fn(&PaymentEvent) -> bool) -> usize {
        self.events.read().await.iter().filter(|e| predicate(e)).count()
    }

    async fn push(&self, event: PaymentEvent) {
        self.events.write().await.push(event);
    }
}

#[async_trait]
impl EventNotifier for RecordingNotifier {
    async fn order_load(&self, order_id: &OrderId) {
        self.push(PaymentEvent::OrderLoad(order_id.clone())).await;
    }

    async fn order_created(&self, order: &Order) {
        self.push(PaymentEvent::OrderCreated(order.id.clone())).await;
    }

    async fn order_done(&self, order: &Order, _message: &IpnMessage) {
        self.push(PaymentEvent::OrderDone(order.id.clone())).await;
    }

    async fn order_success(&self, order: &Order, _message: &IpnMessage) {
        self.push(PaymentEvent::OrderSuccess(order.id.clone())).await;
    }

    async fn order_fail(&self, order: &Order, _message: &IpnMessage) {
        self.push(PaymentEvent::OrderFail(order.id.clone())).await;
    }
}

/// Verifier that answers every notification with the same body, without
/// contacting PayPal. Also records the raw payloads it was asked about.
#[derive(Clone)]
pub struct FixedResponseVerifier {
    answer: String,
    seen: Arc<RwLock<Vec<String>>>,
}

impl FixedResponseVerifier {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            seen: Arc::default(),
        }
    }

    pub async fn seen(&self) -> Vec<String> {
        self.seen.read().await.clone()
    }
}

#[async_trait]
impl HttpVerifier for FixedResponseVerifier {
    async fn verify(&self, payload: &IpnPayload) -> Result<String> {
        self.seen.write().await.push(payload.raw().to_string());
        Ok(self.answer.clone())
    }
}
