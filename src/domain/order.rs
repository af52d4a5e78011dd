use super::money::MinorUnits;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an order in the host application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One row of the shopping cart uploaded to PayPal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    /// Unit price.
    pub amount: MinorUnits,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(name: impl Into<String>, amount: MinorUnits, quantity: u32) -> Self {
        Self {
            name: name.into(),
            amount,
            quantity,
        }
    }
}

/// An order as exposed by the host application's order bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Total the buyer must pay, discount already applied.
    pub amount: MinorUnits,
    pub currency: String,
    pub cart: Vec<CartLine>,
    pub discount: Option<MinorUnits>,
}

impl Order {
    pub fn new(id: impl Into<OrderId>, amount: MinorUnits, currency: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount,
            currency: currency.into(),
            cart: Vec::new(),
            discount: None,
        }
    }

    pub fn with_line(mut self, line: CartLine) -> Self {
        self.cart.push(line);
        self
    }

    pub fn with_discount(mut self, discount: MinorUnits) -> Self {
        self.discount = Some(discount);
        self
    }
}
