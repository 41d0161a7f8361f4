//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! turnera-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `TURNERA_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use sqlx::PgPool;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the server database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing or a migration
/// fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("TURNERA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("TURNERA_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
