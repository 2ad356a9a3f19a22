//! Order types
//!
//! An order moves `Open -> Closed` (paid and receipted) or
//! `Open -> Cancelled` (abandoned). Terminal states are final.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Open,
    Closed,
    Cancelled,
}

/// Payment method recorded when an order is closed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Owning table
    pub table_id: Uuid,
    /// Waiter who opened the order
    pub waiter_id: Uuid,
    pub status: OrderStatus,
    /// Unix millis
    pub opened_at: i64,
    /// Unix millis, set on close only
    pub closed_at: Option<i64>,
    /// Set on close only
    pub payment_method: Option<PaymentMethod>,
}

impl Order {
    pub fn open(table_id: Uuid, waiter_id: Uuid, opened_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id,
            waiter_id,
            status: OrderStatus::Open,
            opened_at,
            closed_at: None,
            payment_method: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    pub fn is_closed(&self) -> bool {
        self.status == OrderStatus::Closed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }
}

/// One product line within one order
///
/// `unit_price` is the product price captured when the line was created;
/// later catalog price changes never touch existing lines. The line total
/// is always derived, so it cannot drift from quantity and price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    /// Always positive; a line at zero is deleted, not stored
    pub quantity: i32,
    /// Price snapshot in minor currency units
    pub unit_price: i64,
}

impl OrderItem {
    pub fn new(order_id: Uuid, product_id: Uuid, quantity: i32, unit_price: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            quantity,
            unit_price,
        }
    }

    /// `quantity x unit_price`, in minor currency units
    pub fn line_total(&self) -> i64 {
        i64::from(self.quantity) * self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_is_derived() {
        let mut item = OrderItem::new(Uuid::new_v4(), Uuid::new_v4(), 3, 80);
        assert_eq!(item.line_total(), 240);

        item.quantity = 2;
        assert_eq!(item.line_total(), 160);
    }

    #[test]
    fn open_order_has_no_payment() {
        let order = Order::open(Uuid::new_v4(), Uuid::new_v4(), 1_700_000_000_000);
        assert!(order.is_open());
        assert_eq!(order.closed_at, None);
        assert_eq!(order.payment_method, None);
    }
}
