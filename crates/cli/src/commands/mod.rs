//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod vendor;

use secrecy::SecretString;

/// Load the database URL the same way the server does: `VENDORA_DATABASE_URL`
/// with a `DATABASE_URL` fallback.
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("VENDORA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "VENDORA_DATABASE_URL not set".into())
}
