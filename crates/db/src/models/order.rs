//! Order and order-item domain types.

use chrono::{DateTime, Utc};

use storelab_core::{CustomerId, OrderId, OrderItemId, OrderStatus, Price, ProductId};

/// An order (domain type). Owned by exactly one customer; deleting the
/// customer deletes the order and, transitively, its items.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    pub customer_id: CustomerId,
    /// Assigned by the database at insert time.
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Price,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
}

/// Fields for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    /// Defaults to [`OrderStatus::Pending`].
    pub status: OrderStatus,
    pub total_amount: Price,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
}

impl NewOrder {
    /// A new pending order with no addresses or notes.
    #[must_use]
    pub fn new(customer_id: CustomerId, total_amount: Price) -> Self {
        Self {
            customer_id,
            status: OrderStatus::default(),
            total_amount,
            shipping_address: None,
            billing_address: None,
            notes: None,
        }
    }
}

/// A line on an order.
///
/// `total_price` is the stored generated column `quantity * unit_price`; it
/// cannot be written directly and recomputes whenever either operand changes.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Unique order-item ID.
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Always positive.
    pub quantity: i64,
    /// Price per unit at the time the line was placed.
    pub unit_price: Price,
    /// Derived line total.
    pub total_price: Price,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_starts_pending() {
        let new = NewOrder::new(CustomerId::new(1), Price::from_cents(2000));
        assert_eq!(new.status, OrderStatus::Pending);
        assert!(new.notes.is_none());
    }
}
