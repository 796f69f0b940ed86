//! Read-only projections: order summaries, history, and statistics.

use chrono::{DateTime, Utc};

use storelab_core::{CustomerId, Email, OrderId, OrderStatus, Price};

/// One row of the `order_summary` view: an order joined to its customer,
/// with a left-join count of its items (zero for item-less orders).
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub order_id: OrderId,
    /// Customer first and last name joined with a space.
    pub customer_name: String,
    pub email: Email,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Price,
    /// Number of order items on the order.
    pub total_items: i64,
}

/// Scope for [`crate::db::OrderRepository::summaries`].
#[derive(Debug, Clone, Copy, Default)]
pub enum SummaryFilter {
    /// Every order.
    #[default]
    All,
    /// Only one customer's orders.
    Customer(CustomerId),
}

/// One row of a customer's order history, newest first.
#[derive(Debug, Clone)]
pub struct OrderHistoryEntry {
    pub order_id: OrderId,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Price,
    pub total_items: i64,
}

/// Aggregate order statistics. All amounts are zero when no orders exist.
#[derive(Debug, Clone, Copy)]
pub struct OrderStats {
    pub total_orders: i64,
    pub total_revenue: Price,
    pub average_order_value: Price,
    pub min_order: Price,
    pub max_order: Price,
}
