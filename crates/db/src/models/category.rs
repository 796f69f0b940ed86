//! Category domain type.

use storelab_core::CategoryId;

/// A product category (lookup entity).
///
/// Categories are referenced by products; deleting a category nulls the
/// reference on its products rather than deleting them.
#[derive(Debug, Clone)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Unique category name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
}
