/// Schema bootstrap
///
/// The service owns a single table. It is created on startup if missing;
/// there is no versioned migration history.

use sqlx::postgres::PgPool;
use tracing::info;

/// DDL for the `users` table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL
)
"#;

/// Creates the `users` table if it does not exist yet
///
/// Safe to call on every startup.
///
/// # Errors
///
/// Returns an error if the statement fails or the connection is lost
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;

    info!("Database schema ensured");
    Ok(())
}

/// Removes every user row (USE WITH CAUTION!)
///
/// Intended for test setup against a scratch database.
pub async fn truncate_users(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE users RESTART IDENTITY")
        .execute(pool)
        .await?;

    Ok(())
}
