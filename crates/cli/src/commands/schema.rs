//! Schema lifecycle commands.

use tracing::info;

use storelab_db::db::schema;

/// Create every schema object in dependency order.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a statement fails.
pub async fn setup() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Creating schema...");
    schema::create_all(&pool).await?;
    info!("Schema ready");

    Ok(())
}

/// Drop and recreate the schema for a clean slate.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a statement fails.
pub async fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Resetting schema...");
    schema::reset(&pool).await?;
    info!("Schema reset");

    Ok(())
}
