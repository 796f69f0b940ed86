//! Integration test support for storelab.
//!
//! Each test gets its own in-memory `SQLite` database: [`TestContext::new`]
//! creates the schema, [`TestContext::seeded`] also loads the sample data
//! set. No server, no shared state between tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use storelab_core::{Email, Price};
use storelab_db::db::{
    self, CategoryRepository, CustomerRepository, OrderRepository, ProductRepository,
};
use storelab_db::models::{Category, Customer, NewCustomer, NewProduct, Product};

/// A fresh database plus accessors for every repository.
pub struct TestContext {
    pub pool: SqlitePool,
}

impl TestContext {
    /// An in-memory database with the schema created.
    ///
    /// # Panics
    ///
    /// Panics if the pool or schema cannot be set up.
    pub async fn new() -> Self {
        let options = "sqlite::memory:"
            .parse::<SqliteConnectOptions>()
            .expect("in-memory SQLite URL parses")
            .foreign_keys(true);

        // A single connection keeps every query on the same in-memory
        // database, and idle reaping would destroy it between queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("in-memory pool connects");

        db::schema::create_all(&pool).await.expect("schema creates");

        Self { pool }
    }

    /// An in-memory database with the sample data set loaded.
    ///
    /// # Panics
    ///
    /// Panics if setup or seeding fails.
    pub async fn seeded() -> Self {
        let ctx = Self::new().await;
        db::seed::sample_data(&ctx.pool)
            .await
            .expect("sample data seeds");
        ctx
    }

    #[must_use]
    pub const fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(&self.pool)
    }

    #[must_use]
    pub const fn customers(&self) -> CustomerRepository<'_> {
        CustomerRepository::new(&self.pool)
    }

    #[must_use]
    pub const fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(&self.pool)
    }

    #[must_use]
    pub const fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(&self.pool)
    }
}

/// The canonical walk-through fixture: an Electronics category, John Doe,
/// and a $10.00 Widget with 50 in stock.
pub struct WidgetScenario {
    pub category: Category,
    pub customer: Customer,
    pub product: Product,
}

/// Seed the [`WidgetScenario`] into a fresh context.
///
/// # Panics
///
/// Panics if any insert fails.
pub async fn widget_scenario(ctx: &TestContext) -> WidgetScenario {
    let category = ctx
        .categories()
        .create("Electronics", Some("Electronic devices and gadgets"))
        .await
        .expect("category inserts");

    let email = Email::parse("john@x.com").expect("fixture email parses");
    let customer = ctx
        .customers()
        .create(&NewCustomer::new("John", "Doe", email))
        .await
        .expect("customer inserts");

    let product = ctx
        .products()
        .create(&NewProduct {
            category_id: Some(category.id),
            stock_quantity: 50,
            ..NewProduct::new("Widget", "W-1", Price::from_cents(1000))
        })
        .await
        .expect("product inserts");

    WidgetScenario {
        category,
        customer,
        product,
    }
}
