//! Product repository.
//!
//! Stock moves through two distinct paths: the order flow decrements stock
//! as a side effect of [`super::OrderRepository::add_item`] (no floor), and
//! [`ProductRepository::adjust_stock`] handles manual restocks and
//! corrections (floored at zero).

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use storelab_core::{CategoryId, Price, ProductId};

use super::RepositoryError;
use crate::models::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "product_id, product_name, description, category_id, price_cents, \
                               stock_quantity, sku, is_active, created_at, updated_at";

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    product_id: ProductId,
    product_name: String,
    description: Option<String>,
    category_id: Option<CategoryId>,
    price_cents: Price,
    stock_quantity: i64,
    sku: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.product_id,
            name: row.product_name,
            description: row.description,
            category_id: row.category_id,
            price: row.price_cents,
            stock_quantity: row.stock_quantity,
            sku: row.sku,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UniqueViolation` if the SKU is taken.
    /// Returns `RepositoryError::ForeignKeyViolation` if `category_id`
    /// references a missing category.
    /// Returns `RepositoryError::CheckViolation` if the price is negative.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products
                 (product_name, description, category_id, price_cents, stock_quantity, sku, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.category_id)
        .bind(new.price)
        .bind(new.stock_quantity)
        .bind(&new.sku)
        .bind(new.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::ForeignKeyViolation(
                    "product references a missing category".to_owned(),
                );
            }
            RepositoryError::from_write(e)
        })?;

        Ok(row.into())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get a product by its unique SKU.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_sku(&self, sku: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = ?1"
        ))
        .bind(sku)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List active products, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE is_active = 1
             ORDER BY product_name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List a category's products by category name, alphabetically, with
    /// limit/offset pagination.
    ///
    /// An unknown category name yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_category(
        &self,
        category_name: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT p.product_id, p.product_name, p.description, p.category_id, p.price_cents,
                    p.stock_quantity, p.sku, p.is_active, p.created_at, p.updated_at
             FROM products p
             JOIN categories c ON p.category_id = c.category_id
             WHERE c.category_name = ?1
             ORDER BY p.product_name ASC
             LIMIT ?2 OFFSET ?3",
        )
        .bind(category_name)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update a product's price, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::CheckViolation` if the price is negative.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_price(
        &self,
        id: ProductId,
        price: Price,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products
             SET price_cents = ?1, updated_at = CURRENT_TIMESTAMP
             WHERE product_id = ?2
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(price)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Activate or deactivate a product, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_active(
        &self,
        id: ProductId,
        is_active: bool,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products
             SET is_active = ?1, updated_at = CURRENT_TIMESTAMP
             WHERE product_id = ?2
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(is_active)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Manually adjust a product's stock by `delta` (positive to restock,
    /// negative to correct), returning the new stock level.
    ///
    /// Unlike the order-flow decrement, this path refuses to drive stock
    /// below zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has the SKU.
    /// Returns `RepositoryError::InsufficientStock` if the delta would make
    /// stock negative; the stock level is left unchanged.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn adjust_stock(&self, sku: &str, delta: i64) -> Result<i64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let stock = sqlx::query_scalar::<_, i64>(
            "SELECT stock_quantity FROM products WHERE sku = ?1",
        )
        .bind(sku)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let new_stock = stock + delta;
        if new_stock < 0 {
            return Err(RepositoryError::InsufficientStock { available: stock });
        }

        sqlx::query(
            "UPDATE products
             SET stock_quantity = ?1, updated_at = CURRENT_TIMESTAMP
             WHERE sku = ?2",
        )
        .bind(new_stock)
        .bind(sku)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(new_stock)
    }

    /// Count products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Delete a product by its ID. Cascade-deletes its order items; stock
    /// already decremented by those items is not restored anywhere.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
