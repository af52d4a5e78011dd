use crate::domain::order::OrderId;
use crate::domain::ports::TransactionLog;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for settled PayPal transactions.
pub const CF_TRANSACTIONS: &str = "ipn_transactions";

/// Value stored under each `txn_id` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettledTransaction {
    pub txn_id: String,
    pub order_id: OrderId,
}

/// A persistent transaction log backed by RocksDB.
///
/// Survives restarts, so a notification PayPal re-delivers after a deploy is
/// still recognised as a duplicate. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbTransactionLog {
    db: Arc<DB>,
    // Serialises check-then-put within this process.
    write_lock: Arc<Mutex<()>>,
}

impl RocksDbTransactionLog {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::default(),
        })
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_TRANSACTIONS).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(
                "Transactions column family not found",
            )))
        })
    }

    pub fn get(&self, txn_id: &str) -> Result<Option<SettledTransaction>> {
        let cf = self.cf()?;
        match self.db.get_cf(&cf, txn_id.as_bytes())? {
            Some(bytes) => {
                let settled = serde_json::from_slice(&bytes).map_err(|e| {
                    PaymentError::InternalError(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Deserialization error: {}", e),
                    )))
                })?;
                Ok(Some(settled))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TransactionLog for RocksDbTransactionLog {
    async fn record(&self, txn_id: &str, order_id: &OrderId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let cf = self.cf()?;

        if self.get(txn_id)?.is_some() {
            return Ok(false);
        }

        let value = serde_json::to_vec(&SettledTransaction {
            txn_id: txn_id.to_string(),
            order_id: order_id.clone(),
        })
        .map_err(|e| {
            PaymentError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;

        self.db.put_cf(&cf, txn_id.as_bytes(), value)?;
        Ok(true)
    }
}
