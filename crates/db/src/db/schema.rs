//! Schema definition and lifecycle.
//!
//! Objects are created in dependency order - `categories` and `customers`
//! first, then `products`, `orders`, `order_items`, the foreign-key indexes,
//! and finally the `order_summary` view - and dropped in reverse for a clean
//! reset.

use sqlx::SqlitePool;
use tracing::info;

use super::RepositoryError;

const CREATE_CATEGORIES: &str = "
CREATE TABLE IF NOT EXISTS categories (
    category_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name TEXT    NOT NULL UNIQUE,
    description   TEXT
)";

const CREATE_CUSTOMERS: &str = "
CREATE TABLE IF NOT EXISTS customers (
    customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    phone       TEXT,
    address     TEXT,
    city        TEXT,
    state       TEXT,
    zip_code    TEXT,
    country     TEXT NOT NULL DEFAULT 'USA',
    created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_PRODUCTS: &str = "
CREATE TABLE IF NOT EXISTS products (
    product_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    product_name   TEXT NOT NULL,
    description    TEXT,
    category_id    INTEGER REFERENCES categories (category_id) ON DELETE SET NULL,
    price_cents    INTEGER NOT NULL CHECK (price_cents >= 0),
    stock_quantity INTEGER NOT NULL DEFAULT 0,
    sku            TEXT NOT NULL UNIQUE,
    is_active      INTEGER NOT NULL DEFAULT 1,
    created_at     TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at     TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_ORDERS: &str = "
CREATE TABLE IF NOT EXISTS orders (
    order_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id        INTEGER NOT NULL REFERENCES customers (customer_id) ON DELETE CASCADE,
    order_date         TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    status             TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'processing', 'shipped', 'delivered', 'cancelled')),
    total_amount_cents INTEGER NOT NULL,
    shipping_address   TEXT,
    billing_address    TEXT,
    notes              TEXT
)";

// total_price_cents is a stored generated column: it recomputes whenever
// quantity or unit_price_cents change, and writing it directly is an error.
const CREATE_ORDER_ITEMS: &str = "
CREATE TABLE IF NOT EXISTS order_items (
    order_item_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id          INTEGER NOT NULL REFERENCES orders (order_id) ON DELETE CASCADE,
    product_id        INTEGER NOT NULL REFERENCES products (product_id) ON DELETE CASCADE,
    quantity          INTEGER NOT NULL CHECK (quantity > 0),
    unit_price_cents  INTEGER NOT NULL,
    total_price_cents INTEGER GENERATED ALWAYS AS (quantity * unit_price_cents) STORED
)";

// SQLite does not index foreign-key columns automatically.
const CREATE_INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products (category_id)",
    "CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders (customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items (order_id)",
    "CREATE INDEX IF NOT EXISTS idx_order_items_product ON order_items (product_id)",
];

// The left join keeps item-less orders in the projection with a zero count.
const CREATE_ORDER_SUMMARY: &str = "
CREATE VIEW IF NOT EXISTS order_summary AS
SELECT o.order_id,
       o.customer_id,
       c.first_name || ' ' || c.last_name AS customer_name,
       c.email,
       o.order_date,
       o.status,
       o.total_amount_cents,
       COUNT(oi.order_item_id) AS total_items
FROM orders o
JOIN customers c ON c.customer_id = o.customer_id
LEFT JOIN order_items oi ON oi.order_id = o.order_id
GROUP BY o.order_id";

const DROP_STATEMENTS: [&str; 6] = [
    "DROP VIEW IF EXISTS order_summary",
    "DROP TABLE IF EXISTS order_items",
    "DROP TABLE IF EXISTS orders",
    "DROP TABLE IF EXISTS products",
    "DROP TABLE IF EXISTS customers",
    "DROP TABLE IF EXISTS categories",
];

/// Create every table, index, and view, in dependency order.
///
/// Idempotent: existing objects are left alone.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails.
pub async fn create_all(pool: &SqlitePool) -> Result<(), RepositoryError> {
    let tables = [
        CREATE_CATEGORIES,
        CREATE_CUSTOMERS,
        CREATE_PRODUCTS,
        CREATE_ORDERS,
        CREATE_ORDER_ITEMS,
    ];
    for statement in tables.iter().chain(&CREATE_INDEXES) {
        sqlx::query(statement).execute(pool).await?;
    }
    sqlx::query(CREATE_ORDER_SUMMARY).execute(pool).await?;

    info!("schema created");
    Ok(())
}

/// Drop every schema object, children before parents.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails.
pub async fn drop_all(pool: &SqlitePool) -> Result<(), RepositoryError> {
    for statement in DROP_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("schema dropped");
    Ok(())
}

/// Drop and recreate the schema.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails.
pub async fn reset(pool: &SqlitePool) -> Result<(), RepositoryError> {
    drop_all(pool).await?;
    create_all(pool).await
}
