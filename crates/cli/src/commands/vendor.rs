//! Vendor management commands.

use tracing::info;

use vendora_server::db;

/// Approve a vendor so they appear in the public directory.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or no vendor profile exists for the given account.
pub async fn approve(id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let result = sqlx::query("UPDATE vendor_profiles SET approved = TRUE WHERE user_id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(format!("no vendor profile for account {id}").into());
    }

    info!("Vendor {id} approved");
    Ok(())
}
