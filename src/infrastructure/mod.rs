//! Adapters implementing the domain ports.

pub mod in_memory;
pub mod paypal_client;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_doubles;
pub mod tracing_notifier;
pub mod url_factory;
