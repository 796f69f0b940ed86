//! Order and order-item repository.
//!
//! [`OrderRepository::add_item`] carries the schema's one side effect: the
//! insert of an order line and the decrement of the product's stock happen
//! in a single transaction, so the two can never diverge.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use storelab_core::{CustomerId, Email, OrderId, OrderItemId, OrderStatus, Price, ProductId};

use super::RepositoryError;
use crate::models::{
    NewOrder, Order, OrderHistoryEntry, OrderItem, OrderStats, OrderSummary, SummaryFilter,
};

const ORDER_COLUMNS: &str = "order_id, customer_id, order_date, status, total_amount_cents, \
                             shipping_address, billing_address, notes";

const ITEM_COLUMNS: &str =
    "order_item_id, order_id, product_id, quantity, unit_price_cents, total_price_cents";

// The stored procedure's query: left-join item counts so item-less orders
// still appear, newest order first.
const HISTORY_QUERY: &str = "
SELECT o.order_id,
       o.order_date,
       o.status,
       o.total_amount_cents,
       COUNT(oi.order_item_id) AS total_items
FROM orders o
LEFT JOIN order_items oi ON oi.order_id = o.order_id
WHERE o.customer_id = ?1
GROUP BY o.order_id
ORDER BY o.order_date DESC, o.order_id DESC";

const HISTORY_BY_EMAIL_QUERY: &str = "
SELECT o.order_id,
       o.order_date,
       o.status,
       o.total_amount_cents,
       COUNT(oi.order_item_id) AS total_items
FROM customers c
JOIN orders o ON o.customer_id = c.customer_id
LEFT JOIN order_items oi ON oi.order_id = o.order_id
WHERE c.email = ?1
GROUP BY o.order_id
ORDER BY o.order_date DESC, o.order_id DESC";

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: OrderId,
    customer_id: CustomerId,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    total_amount_cents: Price,
    shipping_address: Option<String>,
    billing_address: Option<String>,
    notes: Option<String>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.order_id,
            customer_id: row.customer_id,
            order_date: row.order_date,
            status: row.status,
            total_amount: row.total_amount_cents,
            shipping_address: row.shipping_address,
            billing_address: row.billing_address,
            notes: row.notes,
        }
    }
}

/// Internal row type for order-item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_item_id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    quantity: i64,
    unit_price_cents: Price,
    total_price_cents: Price,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.order_item_id,
            order_id: row.order_id,
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price: row.unit_price_cents,
            total_price: row.total_price_cents,
        }
    }
}

/// Internal row type for the `order_summary` view.
#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    order_id: OrderId,
    customer_name: String,
    email: String,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    total_amount_cents: Price,
    total_items: i64,
}

impl TryFrom<SummaryRow> for OrderSummary {
    type Error = RepositoryError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            order_id: row.order_id,
            customer_name: row.customer_name,
            email,
            order_date: row.order_date,
            status: row.status,
            total_amount: row.total_amount_cents,
            total_items: row.total_items,
        })
    }
}

/// Internal row type for order-history queries.
#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    order_id: OrderId,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    total_amount_cents: Price,
    total_items: i64,
}

impl From<HistoryRow> for OrderHistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            order_id: row.order_id,
            order_date: row.order_date,
            status: row.status,
            total_amount: row.total_amount_cents,
            total_items: row.total_items,
        }
    }
}

/// Internal row type for aggregate order statistics.
#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total_orders: i64,
    total_revenue: Price,
    average_order_value: Price,
    min_order: Price,
    max_order: Price,
}

/// Repository for order and order-item database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new order. `order_date` is assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ForeignKeyViolation` if the customer does
    /// not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders
                 (customer_id, status, total_amount_cents, shipping_address, billing_address, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new.customer_id)
        .bind(new.status)
        .bind(new.total_amount)
        .bind(&new.shipping_address)
        .bind(&new.billing_address)
        .bind(&new.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::ForeignKeyViolation(
                    "order references a missing customer".to_owned(),
                );
            }
            RepositoryError::from_write(e)
        })?;

        Ok(row.into())
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Update an order's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = ?1 WHERE order_id = ?2 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Count orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Delete an order by its ID, cascade-deleting its items. Stock
    /// decremented by those items is not restored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE order_id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    // =========================================================================
    // Order items
    // =========================================================================

    /// Insert an order line and decrement the product's stock by `quantity`,
    /// atomically: either both apply or neither does.
    ///
    /// The decrement has no floor - ordering more than is on hand drives
    /// `stock_quantity` negative, and callers reading it must tolerate that.
    /// The reaction is insert-only: later quantity changes or line removals
    /// do not put stock back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ForeignKeyViolation` if the order or
    /// product does not exist.
    /// Returns `RepositoryError::CheckViolation` if `quantity` is not
    /// positive.
    /// Returns `RepositoryError::StockAdjustment` if the stock update
    /// applies to no row; the insert is rolled back.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: i64,
        unit_price: Price,
    ) -> Result<OrderItem, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderItemRow>(&format!(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::ForeignKeyViolation(
                    "order item references a missing order or product".to_owned(),
                );
            }
            RepositoryError::from_write(e)
        })?;

        let updated = sqlx::query(
            "UPDATE products
             SET stock_quantity = stock_quantity - ?1, updated_at = CURRENT_TIMESTAMP
             WHERE product_id = ?2",
        )
        .bind(quantity)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls the insert back.
            return Err(RepositoryError::StockAdjustment(format!(
                "product {product_id} vanished before its stock could be decremented"
            )));
        }

        tx.commit().await?;

        debug!(order = %order_id, product = %product_id, quantity, "order item added");
        Ok(row.into())
    }

    /// Change a line's quantity. The generated line total recomputes; stock
    /// is deliberately untouched (the decrement applies on insert only).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::CheckViolation` if `quantity` is not
    /// positive.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_item_quantity(
        &self,
        id: OrderItemId,
        quantity: i64,
    ) -> Result<OrderItem, RepositoryError> {
        let row = sqlx::query_as::<_, OrderItemRow>(&format!(
            "UPDATE order_items SET quantity = ?1 WHERE order_item_id = ?2 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(quantity)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Remove a line from its order. Stock is deliberately not restored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_item(&self, id: OrderItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM order_items WHERE order_item_id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List an order's lines in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items
             WHERE order_id = ?1
             ORDER BY order_item_id ASC"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Sum of the order's generated line totals, zero for an item-less or
    /// unknown order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn order_total(&self, order_id: OrderId) -> Result<Price, RepositoryError> {
        let total = sqlx::query_scalar::<_, Price>(
            "SELECT COALESCE(SUM(total_price_cents), 0)
             FROM order_items
             WHERE order_id = ?1",
        )
        .bind(order_id)
        .fetch_one(self.pool)
        .await?;

        Ok(total)
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Read the `order_summary` view, newest order first: every order, or a
    /// single customer's with `SummaryFilter::Customer`.
    ///
    /// The view is computed from live table state on every read; orders
    /// without items appear with `total_items == 0`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn summaries(
        &self,
        filter: SummaryFilter,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let query = match filter {
            SummaryFilter::All => sqlx::query_as::<_, SummaryRow>(
                "SELECT order_id, customer_name, email, order_date, status,
                        total_amount_cents, total_items
                 FROM order_summary
                 ORDER BY order_date DESC, order_id DESC",
            ),
            SummaryFilter::Customer(id) => sqlx::query_as::<_, SummaryRow>(
                "SELECT order_id, customer_name, email, order_date, status,
                        total_amount_cents, total_items
                 FROM order_summary
                 WHERE customer_id = ?1
                 ORDER BY order_date DESC, order_id DESC",
            )
            .bind(id),
        };

        let rows = query.fetch_all(self.pool).await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// A customer's orders, newest first, with left-join item counts.
    ///
    /// An unknown customer and a customer with no orders both yield an empty
    /// Vec; the two cases are not distinguished.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn history_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderHistoryEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, HistoryRow>(HISTORY_QUERY)
            .bind(customer_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Like [`Self::history_for_customer`], keyed by the customer's email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn history_for_email(
        &self,
        email: &Email,
    ) -> Result<Vec<OrderHistoryEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, HistoryRow>(HISTORY_BY_EMAIL_QUERY)
            .bind(email.as_str())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Aggregate order statistics over all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<OrderStats, RepositoryError> {
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT COUNT(*) AS total_orders,
                    COALESCE(SUM(total_amount_cents), 0) AS total_revenue,
                    CAST(COALESCE(AVG(total_amount_cents), 0) AS INTEGER) AS average_order_value,
                    COALESCE(MIN(total_amount_cents), 0) AS min_order,
                    COALESCE(MAX(total_amount_cents), 0) AS max_order
             FROM orders",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(OrderStats {
            total_orders: row.total_orders,
            total_revenue: row.total_revenue,
            average_order_value: row.average_order_value,
            min_order: row.min_order,
            max_order: row.max_order,
        })
    }
}
