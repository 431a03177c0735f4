/// Database models for userhub
///
/// # Models
///
/// - `user`: The user record and its CRUD queries
///
/// # Example
///
/// ```no_run
/// use userhub_shared::models::user::{User, UserPayload};
/// use userhub_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = UserPayload {
///     first_name: "Ada".to_string(),
///     last_name: "Lovelace".to_string(),
///     email: "ada@example.com".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod user;
