//! Customer and address repository.

use sqlx::SqlitePool;

use ims_core::{AddressId, CustomerId, PhoneNumber};

use super::RepositoryError;
use crate::models::{Address, Customer};

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    address_id: Option<i64>,
    phone: i64,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: CustomerId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            address_id: row.address_id.map(AddressId::new),
            phone: PhoneNumber::new(row.phone),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i64,
    line_1: String,
    line_2: Option<String>,
    city: String,
    state: String,
    zip: String,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            line_1: row.line_1,
            line_2: row.line_2,
            city: row.city,
            state: row.state,
            zip: row.zip,
        }
    }
}

/// Repository for customer and address database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all customers ordered by last name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, first_name, last_name, address_id, phone
            FROM customer
            ORDER BY last_name, first_name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an address by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_address(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, line_1, line_2, city, state, zip
            FROM address
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a customer. Returns `false` if there was nothing to delete.
    ///
    /// The customer's address row is left in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM customer WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customer")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::seeded_pool;

    #[tokio::test]
    async fn test_list_all_orders_by_last_name() {
        let pool = seeded_pool().await;
        let customers = CustomerRepository::new(&pool).list_all().await.unwrap();

        let last_names: Vec<&str> = customers.iter().map(|c| c.last_name.as_str()).collect();
        assert_eq!(
            last_names,
            [
                "Anderson",
                "Becker",
                "Fischer",
                "Iverson",
                "Lopez",
                "Natarajan",
                "Olson"
            ]
        );
    }

    #[tokio::test]
    async fn test_list_all_maps_nullable_address() {
        let pool = seeded_pool().await;
        let customers = CustomerRepository::new(&pool).list_all().await.unwrap();

        let iverson = customers.iter().find(|c| c.last_name == "Iverson").unwrap();
        assert_eq!(iverson.address_id, None);

        let lopez = customers.iter().find(|c| c.last_name == "Lopez").unwrap();
        assert_eq!(lopez.address_id, Some(AddressId::new(1)));
        assert_eq!(lopez.phone.formatted(), "701-777-1234");
    }

    #[tokio::test]
    async fn test_get_address() {
        let pool = seeded_pool().await;
        let repo = CustomerRepository::new(&pool);

        let address = repo.get_address(AddressId::new(2)).await.unwrap().unwrap();
        assert_eq!(address.line_2.as_deref(), Some("Suite 200"));
        assert_eq!(address.city, "Grand Forks");

        assert!(repo.get_address(AddressId::new(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_customer() {
        let pool = seeded_pool().await;
        let repo = CustomerRepository::new(&pool);

        assert!(repo.delete(CustomerId::new(2)).await.unwrap());
        assert!(!repo.delete(CustomerId::new(2)).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 6);
        // The address stays behind for other customers.
        assert!(repo.get_address(AddressId::new(2)).await.unwrap().is_some());
    }
}
