//! Product domain types.

use ims_core::{Price, ProductId};

/// A product that exists in the `product` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Storage-assigned ID.
    pub id: ProductId,
    /// Display name (never empty).
    pub name: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Units on hand (never negative).
    pub quantity_available: i64,
    /// Unit price (never negative).
    pub price: Price,
}

/// A product that has not been stored yet.
///
/// The ID is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub quantity_available: i64,
    pub price: Price,
}

impl Product {
    /// Attach a storage ID to validated product fields.
    #[must_use]
    pub fn from_new(id: ProductId, product: NewProduct) -> Self {
        Self {
            id,
            name: product.name,
            description: product.description,
            quantity_available: product.quantity_available,
            price: product.price,
        }
    }
}
