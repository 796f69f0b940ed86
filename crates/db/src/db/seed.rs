//! Sample data for the practice schema.
//!
//! Everything goes through the repositories - in particular, order items are
//! placed with [`OrderRepository::add_item`], so seeded stock levels already
//! reflect the order-flow decrement.

use sqlx::SqlitePool;
use tracing::info;

use storelab_core::{OrderStatus, Price};

use super::{
    CategoryRepository, CustomerRepository, OrderRepository, ProductRepository, RepositoryError,
};
use crate::models::{Category, NewCustomer, NewOrder, NewProduct, Product};

/// Row counts inserted by [`sample_data`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedReport {
    pub categories: usize,
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
}

const CATEGORIES: [(&str, &str); 4] = [
    ("Electronics", "Electronic devices and gadgets"),
    ("Clothing", "Apparel and accessories"),
    ("Books", "Books and publications"),
    ("Home & Garden", "Home improvement and garden supplies"),
];

// (name, category, price in cents, stock, sku)
const PRODUCTS: [(&str, &str, i64, i64, &str); 12] = [
    ("Laptop", "Electronics", 74999, 25, "ELEC-001"),
    ("Smartphone", "Electronics", 59999, 40, "ELEC-002"),
    ("Wireless Headphones", "Electronics", 12999, 60, "ELEC-003"),
    ("Tablet", "Electronics", 32999, 30, "ELEC-004"),
    ("Smart Watch", "Electronics", 19999, 45, "ELEC-005"),
    ("T-Shirt", "Clothing", 1999, 150, "CLOTH-001"),
    ("Jeans", "Clothing", 5999, 80, "CLOTH-002"),
    ("Sneakers", "Clothing", 8999, 70, "CLOTH-003"),
    ("Database Design Basics", "Books", 3999, 35, "BOOK-001"),
    ("Learning SQL", "Books", 2999, 50, "BOOK-002"),
    ("Garden Hose", "Home & Garden", 2499, 40, "HOME-001"),
    ("LED Desk Lamp", "Home & Garden", 3499, 55, "HOME-002"),
];

// (first, last, email, phone, address, city, state, zip)
const CUSTOMERS: [(&str, &str, &str, &str, &str, &str, &str, &str); 4] = [
    (
        "John", "Doe", "john.doe@email.com", "555-0101", "123 Main St", "Springfield", "IL",
        "62701",
    ),
    (
        "Jane", "Smith", "jane.smith@email.com", "555-0102", "456 Oak Ave", "Portland", "OR",
        "97201",
    ),
    (
        "Bob", "Johnson", "bob.johnson@email.com", "555-0103", "789 Pine Rd", "Austin", "TX",
        "78701",
    ),
    (
        "Maria", "Garcia", "maria.garcia@email.com", "555-0104", "321 Elm St", "San Diego", "CA",
        "92101",
    ),
];

// (customer email, status, line items as (sku, quantity))
const ORDERS: [(&str, OrderStatus, &[(&str, i64)]); 5] = [
    (
        "john.doe@email.com",
        OrderStatus::Delivered,
        &[("ELEC-003", 2), ("BOOK-002", 1)],
    ),
    ("john.doe@email.com", OrderStatus::Shipped, &[("ELEC-001", 1)]),
    (
        "jane.smith@email.com",
        OrderStatus::Processing,
        &[("CLOTH-001", 3), ("CLOTH-002", 1)],
    ),
    ("bob.johnson@email.com", OrderStatus::Pending, &[("HOME-002", 1)]),
    // An order with no items yet; keeps the left-join paths honest.
    ("maria.garcia@email.com", OrderStatus::Pending, &[]),
];

fn seed_integrity(detail: &str) -> RepositoryError {
    RepositoryError::DataCorruption(format!("seed data inconsistency: {detail}"))
}

/// Load the practice data set: categories, customers, products, and orders
/// with their items.
///
/// Not idempotent - seeding twice trips the unique constraints. Reset the
/// schema first for a clean slate.
///
/// # Errors
///
/// Returns `RepositoryError` if any insert fails.
pub async fn sample_data(pool: &SqlitePool) -> Result<SeedReport, RepositoryError> {
    let categories = CategoryRepository::new(pool);
    let customers = CustomerRepository::new(pool);
    let products = ProductRepository::new(pool);
    let orders = OrderRepository::new(pool);

    let mut report = SeedReport::default();

    let mut created_categories: Vec<Category> = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        created_categories.push(categories.create(name, Some(description)).await?);
        report.categories += 1;
    }

    let mut created_products: Vec<Product> = Vec::with_capacity(PRODUCTS.len());
    for (name, category_name, price_cents, stock, sku) in PRODUCTS {
        let category = created_categories
            .iter()
            .find(|c| c.name == category_name)
            .ok_or_else(|| seed_integrity("product references unknown category"))?;

        let new = NewProduct {
            category_id: Some(category.id),
            stock_quantity: stock,
            ..NewProduct::new(name, sku, Price::from_cents(price_cents))
        };
        created_products.push(products.create(&new).await?);
        report.products += 1;
    }

    for (first, last, email, phone, address, city, state, zip) in CUSTOMERS {
        let email = email
            .parse()
            .map_err(|_| seed_integrity("customer email does not parse"))?;
        let new = NewCustomer {
            phone: Some(phone.to_owned()),
            address: Some(address.to_owned()),
            city: Some(city.to_owned()),
            state: Some(state.to_owned()),
            zip_code: Some(zip.to_owned()),
            ..NewCustomer::new(first, last, email)
        };
        customers.create(&new).await?;
        report.customers += 1;
    }

    for (email, status, lines) in ORDERS {
        let email = email
            .parse()
            .map_err(|_| seed_integrity("order email does not parse"))?;
        let customer = customers
            .get_by_email(&email)
            .await?
            .ok_or_else(|| seed_integrity("order references unknown customer"))?;

        let mut total_cents = 0;
        let mut resolved = Vec::with_capacity(lines.len());
        for &(sku, quantity) in lines {
            let product = created_products
                .iter()
                .find(|p| p.sku == sku)
                .ok_or_else(|| seed_integrity("order line references unknown sku"))?;
            total_cents += product.price.cents() * quantity;
            resolved.push((product.id, quantity, product.price));
        }

        let new = NewOrder {
            status,
            ..NewOrder::new(customer.id, Price::from_cents(total_cents))
        };
        let order = orders.create(&new).await?;
        report.orders += 1;

        for (product_id, quantity, unit_price) in resolved {
            orders
                .add_item(order.id, product_id, quantity, unit_price)
                .await?;
            report.order_items += 1;
        }
    }

    info!(
        categories = report.categories,
        customers = report.customers,
        products = report.products,
        orders = report.orders,
        order_items = report.order_items,
        "sample data loaded"
    );

    Ok(report)
}
