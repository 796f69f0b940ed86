//! Read-only reports over the practice schema.

use storelab_core::CustomerId;
use storelab_db::db::OrderRepository;
use storelab_db::models::SummaryFilter;

/// Print order summaries from the `order_summary` view, every order or one
/// customer's.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the query fails.
#[allow(clippy::print_stdout)]
pub async fn summary(customer_id: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let orders = OrderRepository::new(&pool);

    let filter = customer_id.map_or(SummaryFilter::All, |id| {
        SummaryFilter::Customer(CustomerId::new(id))
    });
    let summaries = orders.summaries(filter).await?;

    if summaries.is_empty() {
        println!("No orders found");
        return Ok(());
    }

    println!("{:<8} {:<24} {:<28} {:<12} {:>10} {:>6}", "Order", "Customer", "Email", "Status", "Total", "Items");
    for row in summaries {
        println!(
            "{:<8} {:<24} {:<28} {:<12} {:>10} {:>6}",
            row.order_id,
            row.customer_name,
            row.email,
            row.status,
            format!("${}", row.total_amount),
            row.total_items,
        );
    }

    Ok(())
}

/// Print a customer's order history, newest first.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the query fails.
#[allow(clippy::print_stdout)]
pub async fn history(customer_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let orders = OrderRepository::new(&pool);

    let history = orders
        .history_for_customer(CustomerId::new(customer_id))
        .await?;

    if history.is_empty() {
        println!("No orders for customer {customer_id}");
        return Ok(());
    }

    for entry in history {
        println!(
            "Order #{}: ${} ({}) - {} item(s), placed {}",
            entry.order_id,
            entry.total_amount,
            entry.status,
            entry.total_items,
            entry.order_date.format("%Y-%m-%d %H:%M:%S"),
        );
    }

    Ok(())
}

/// Print aggregate order statistics.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the query fails.
#[allow(clippy::print_stdout)]
pub async fn stats() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let orders = OrderRepository::new(&pool);

    let stats = orders.stats().await?;

    println!("Total orders: {}", stats.total_orders);
    println!("Total revenue: ${}", stats.total_revenue);
    println!("Average order value: ${}", stats.average_order_value);
    println!("Min order: ${}", stats.min_order);
    println!("Max order: ${}", stats.max_order);

    Ok(())
}
