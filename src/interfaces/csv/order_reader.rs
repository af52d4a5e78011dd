use crate::domain::money::MinorUnits;
use crate::domain::order::{CartLine, Order, OrderId};
use crate::error::{PaymentError, Result};
use crate::infrastructure::in_memory::InMemoryOrderBridge;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io::Read;
use tracing::warn;

/// A row of the orders file: `order_id, amount, currency, discount`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OrderRecord {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub discount: Option<i64>,
}

/// A row of the cart file: `order_id, name, amount, quantity`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartRecord {
    pub order_id: String,
    pub name: String,
    pub amount: i64,
    pub quantity: u32,
}

/// Reads typed records from a CSV source with a header row.
///
/// Whitespace around fields is trimmed and short rows are accepted, so a
/// trailing optional column may simply be left out.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RecordReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes the remaining rows.
    pub fn records<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<T>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}

/// Loads orders, and optionally their cart lines, into an in-memory bridge.
///
/// Malformed rows and cart lines of unknown orders are logged and skipped.
pub async fn load_orders<O: Read, C: Read>(
    orders: O,
    cart: Option<C>,
) -> Result<InMemoryOrderBridge> {
    let mut by_id: HashMap<String, Order> = HashMap::new();

    for record in RecordReader::new(orders).records::<OrderRecord>() {
        match record {
            Ok(record) => {
                let mut order = Order::new(
                    OrderId::new(record.order_id.clone()),
                    MinorUnits::new(record.amount),
                    record.currency,
                );
                order.discount = record.discount.map(MinorUnits::new);
                by_id.insert(record.order_id, order);
            }
            Err(e) => warn!(error = %e, "Skipping malformed order row"),
        }
    }

    if let Some(cart) = cart {
        for record in RecordReader::new(cart).records::<CartRecord>() {
            match record {
                Ok(record) => match by_id.get_mut(&record.order_id) {
                    Some(order) => order.cart.push(CartLine::new(
                        record.name,
                        MinorUnits::new(record.amount),
                        record.quantity,
                    )),
                    None => warn!(order_id = %record.order_id, "Cart line for unknown order"),
                },
                Err(e) => warn!(error = %e, "Skipping malformed cart row"),
            }
        }
    }

    let bridge = InMemoryOrderBridge::new();
    for order in by_id.into_values() {
        bridge.insert(order).await;
    }
    Ok(bridge)
}
