//! Database operations for the storelab `SQLite` database.
//!
//! # Tables
//!
//! - `categories` - Product taxonomy (unique `category_name`)
//! - `customers` - Store customers (unique `email`)
//! - `products` - Catalog entries with stock counters (unique `sku`)
//! - `orders` - One row per checkout, owned by a customer
//! - `order_items` - Order lines with a generated `total_price_cents`
//! - `order_summary` - View joining orders to customers and item counts
//!
//! # Lifecycle
//!
//! [`schema::create_all`] creates the objects in dependency order and
//! [`schema::drop_all`] removes them in reverse; [`seed::sample_data`] loads
//! the practice data set through the repositories.

pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;
pub mod schema;
pub mod seed;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use categories::CategoryRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// A unique constraint was breached; `field` names the offending column.
    #[error("unique constraint violation on {field}")]
    UniqueViolation { field: String },

    /// A required column received NULL; `field` names the offending column.
    #[error("not-null constraint violation on {field}")]
    NotNullViolation { field: String },

    /// An insert or update referenced a missing parent row.
    #[error("referential integrity violation: {0}")]
    ForeignKeyViolation(String),

    /// A CHECK constraint rejected the written values.
    #[error("check constraint violation: {0}")]
    CheckViolation(String),

    /// The stock decrement paired with an order-item insert could not be
    /// applied; the whole insert was rolled back.
    #[error("stock adjustment failed: {0}")]
    StockAdjustment(String),

    /// A manual stock adjustment would drive stock below zero.
    #[error("insufficient stock: {available} available")]
    InsufficientStock {
        /// Stock on hand at the time of the attempt.
        available: i64,
    },
}

impl RepositoryError {
    /// Classify a driver error from a mutating statement against the
    /// schema's constraint taxonomy. `SQLite` names the offending column as
    /// `table.column` at the end of its unique/not-null messages.
    pub(crate) fn from_write(e: sqlx::Error) -> Self {
        let sqlx::Error::Database(ref db_err) = e else {
            return Self::Database(e);
        };
        match db_err.kind() {
            ErrorKind::UniqueViolation => Self::UniqueViolation {
                field: offending_column(db_err.message()),
            },
            ErrorKind::NotNullViolation => Self::NotNullViolation {
                field: offending_column(db_err.message()),
            },
            ErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(db_err.message().to_owned()),
            ErrorKind::CheckViolation => Self::CheckViolation(db_err.message().to_owned()),
            _ => Self::Database(e),
        }
    }
}

/// Extract `table.column` from messages shaped like
/// `UNIQUE constraint failed: products.sku`.
fn offending_column(message: &str) -> String {
    message
        .rsplit_once(": ")
        .map_or(message, |(_, column)| column)
        .to_owned()
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Foreign-key enforcement is switched on for every connection; the
/// referential actions in the schema are inert without it. The database
/// file is created if missing.
///
/// # Arguments
///
/// * `database_url` - `SQLite` URL (wrapped in `SecretString`), e.g.
///   `sqlite://storelab.db`
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL does not parse or the database cannot
/// be opened.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = database_url
        .expose_secret()
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
