use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{OrderBridge, TransactionLog};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order bridge.
///
/// Backs the CLI (orders loaded from CSV) and tests; a real host application
/// implements [`OrderBridge`] over its own storage.
#[derive(Default, Clone)]
pub struct InMemoryOrderBridge {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an order.
    pub async fn insert(&self, order: Order) {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order);
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderBridge for InMemoryOrderBridge {
    async fn find_order(&self, order_id: &OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(order_id).cloned())
    }
}

/// Settled transactions kept for the lifetime of the process.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLog {
    transactions: Arc<RwLock<HashMap<String, OrderId>>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn record(&self, txn_id: &str, order_id: &OrderId) -> Result<bool> {
        let mut transactions = self.transactions.write().await;
        if transactions.contains_key(txn_id) {
            return Ok(false);
        }
        transactions.insert(txn_id.to_string(), order_id.clone());
        Ok(true)
    }
}
