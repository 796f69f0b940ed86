//! Customer domain types.

use chrono::{DateTime, Utc};

use storelab_core::{CustomerId, Email};

/// A store customer (domain type).
#[derive(Debug, Clone)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    /// Unique email address.
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    /// Country, defaults to [`NewCustomer::DEFAULT_COUNTRY`].
    pub country: String,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// First and last name joined with a space, as shown in order summaries.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields for creating a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: String,
}

impl NewCustomer {
    /// Country used when the caller does not supply one.
    pub const DEFAULT_COUNTRY: &'static str = "USA";

    /// A new customer with just the required fields; contact details unset,
    /// country defaulted.
    #[must_use]
    pub fn new(first_name: &str, last_name: &str, email: Email) -> Self {
        Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email,
            phone: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: Self::DEFAULT_COUNTRY.to_owned(),
        }
    }
}

/// Contact fields updatable after creation.
#[derive(Debug, Clone, Default)]
pub struct CustomerContact {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_country() {
        let new = NewCustomer::new("John", "Doe", Email::parse("john.doe@email.com").unwrap());
        assert_eq!(new.country, "USA");
        assert!(new.phone.is_none());
    }
}
