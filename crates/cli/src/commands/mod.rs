//! CLI command implementations.

pub mod report;
pub mod schema;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;

use storelab_db::db;

/// Load `.env`, read `DATABASE_URL`, and open a pool.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the database cannot be
/// opened.
pub(crate) async fn connect() -> Result<SqlitePool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    Ok(db::create_pool(&database_url).await?)
}
