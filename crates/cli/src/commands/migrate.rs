//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! vendora-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `VENDORA_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use tracing::info;

use vendora_server::db;

/// Run database migrations from `crates/server/migrations/`.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
