//! Product domain types.

use chrono::{DateTime, Utc};

use storelab_core::{CategoryId, Price, ProductId};

/// A catalog product (domain type).
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Owning category, if any. Nulled when the category is deleted.
    pub category_id: Option<CategoryId>,
    /// Unit price; never negative.
    pub price: Price,
    /// On-hand stock. May go negative through normal order flow — see
    /// [`crate::db::OrderRepository::add_item`].
    pub stock_quantity: i64,
    /// Unique stock-keeping unit, e.g. `ELEC-001`.
    pub sku: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price: Price,
    pub stock_quantity: i64,
    pub sku: String,
    pub is_active: bool,
}

impl NewProduct {
    /// A new active product with empty stock and no category.
    #[must_use]
    pub fn new(name: &str, sku: &str, price: Price) -> Self {
        Self {
            name: name.to_owned(),
            description: None,
            category_id: None,
            price,
            stock_quantity: 0,
            sku: sku.to_owned(),
            is_active: true,
        }
    }
}
