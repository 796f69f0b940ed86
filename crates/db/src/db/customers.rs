//! Customer repository.
//!
//! Mutating updates refresh `updated_at` explicitly; `SQLite` has no
//! ON UPDATE clause, so the refresh is part of each UPDATE statement.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use storelab_core::{CustomerId, Email};

use super::RepositoryError;
use crate::models::{Customer, CustomerContact, NewCustomer};

const CUSTOMER_COLUMNS: &str = "customer_id, first_name, last_name, email, phone, address, \
                                city, state, zip_code, country, created_at, updated_at";

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    customer_id: CustomerId,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    country: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.customer_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            country: row.country,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UniqueViolation` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "INSERT INTO customers
                 (first_name, last_name, email, phone, address, city, state, zip_code, country)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.email.as_str())
        .bind(&new.phone)
        .bind(&new.address)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.zip_code)
        .bind(&new.country)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a customer by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = ?1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers
             ORDER BY created_at DESC, customer_id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Update a customer's contact details, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_contact(
        &self,
        id: CustomerId,
        contact: &CustomerContact,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "UPDATE customers
             SET phone = ?1, address = ?2, city = ?3, state = ?4, zip_code = ?5,
                 updated_at = CURRENT_TIMESTAMP
             WHERE customer_id = ?6
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&contact.phone)
        .bind(&contact.address)
        .bind(&contact.city)
        .bind(&contact.state)
        .bind(&contact.zip_code)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Update a customer's email address, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::UniqueViolation` if the email is already
    /// used by another customer.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_email(
        &self,
        id: CustomerId,
        email: &Email,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "UPDATE customers
             SET email = ?1, updated_at = CURRENT_TIMESTAMP
             WHERE customer_id = ?2
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Count customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Delete a customer by their ID.
    ///
    /// This cascade-deletes the customer's orders and, transitively, their
    /// order items. Stock decremented by those items is not restored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
