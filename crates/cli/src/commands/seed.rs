//! Seed the database with the practice data set.

use tracing::info;

use storelab_db::db::seed;

/// Load the sample data set through the repositories.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or any insert fails
/// (seeding an already-seeded database trips the unique constraints; run
/// `storelab reset` first).
pub async fn sample_data() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Seeding sample data...");
    let report = seed::sample_data(&pool).await?;

    info!("Seeding complete!");
    info!("  Categories: {}", report.categories);
    info!("  Customers: {}", report.customers);
    info!("  Products: {}", report.products);
    info!("  Orders: {}", report.orders);
    info!("  Order items: {}", report.order_items);

    Ok(())
}
