//! Product repository for database operations.
//!
//! All statements bind their inputs; nothing is interpolated into SQL text.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use sqlx::SqlitePool;

use ims_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::{NewProduct, Product};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    quantity_available: i64,
    price: f64,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::from_f64(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            quantity_available: row.quantity_available,
            price,
        })
    }
}

/// Aggregate stock figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySummary {
    /// Number of distinct products.
    pub product_count: i64,
    /// Sum of `quantity_available` over all products.
    pub total_units: i64,
    /// Products with nothing on hand.
    pub out_of_stock: i64,
    /// Sum of `quantity_available * price`.
    pub stock_value: Decimal,
}

// =============================================================================
// Repository
// =============================================================================

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

    /// List all products, most expensive first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, quantity_available, price
            FROM product
            ORDER BY price DESC, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored price is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, quantity_available, price
            FROM product
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a new product and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO product (name, description, quantity_available, price)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.quantity_available)
        .bind(product.price.to_f64())
        .execute(self.pool)
        .await?;

        let id = ProductId::new(result.last_insert_rowid());
        Ok(Product::from_new(id, product))
    }

    /// Overwrite every field of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE product
            SET name = ?, description = ?, quantity_available = ?, price = ?
            WHERE id = ?
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.quantity_available)
        .bind(product.price.to_f64())
        .bind(product.id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a product. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Stock totals across all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stock value is negative.
    pub async fn summary(&self) -> Result<InventorySummary, RepositoryError> {
        let (product_count, total_units, out_of_stock, stock_value): (i64, i64, i64, f64) =
            sqlx::query_as(
                r"
                SELECT COUNT(*),
                       COALESCE(SUM(quantity_available), 0),
                       COALESCE(SUM(CASE WHEN quantity_available = 0 THEN 1 ELSE 0 END), 0),
                       COALESCE(SUM(quantity_available * price), 0.0)
                FROM product
                ",
            )
            .fetch_one(self.pool)
            .await?;

        let stock_value = Decimal::from_f64(stock_value)
            .filter(|value| !value.is_sign_negative())
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!("invalid stock value: {stock_value}"))
            })?
            .round_dp(2);

        Ok(InventorySummary {
            product_count,
            total_units,
            out_of_stock,
            stock_value,
        })
    }
}
