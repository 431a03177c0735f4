/// User model and database operations
///
/// This module provides the User model and the queries behind the
/// Postgres repository.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     first_name TEXT NOT NULL,
///     last_name TEXT NOT NULL,
///     email TEXT NOT NULL
/// );
/// ```
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
/// let user = User::create(
///     &pool,
///     UserPayload {
///         first_name: "Ada".to_string(),
///         last_name: "Lovelace".to_string(),
///         email: "ada@example.com".to_string(),
///     },
/// )
/// .await?;
/// println!("Created user: {}", user.id);
///
/// let found = User::find_by_id(&pool, user.id).await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

/// User record as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned identifier, never reused or changed
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Free-form email address
    ///
    /// Neither format nor uniqueness is enforced.
    pub email: String,
}

/// Validated write model used for both create and full replace
///
/// Values are expected to be trimmed already; the rules below only reject
/// blanks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserPayload {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub first_name: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub last_name: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub email: String,
}

impl User {
    /// Builds a record from an id and a payload
    pub fn from_payload(id: i64, data: UserPayload) -> Self {
        Self {
            id,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
        }
    }

    /// Creates a new user in the database
    ///
    /// # Returns
    ///
    /// The newly created user with its generated ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn create(pool: &PgPool, data: UserPayload) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, email
            "#,
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use userhub_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// if let Some(user) = User::find_by_id(&pool, 42).await? {
    ///     println!("Found user: {}", user.email);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Overwrites all fields of an existing user
    ///
    /// There is no partial update: every column is replaced by the payload.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UserPayload,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4
            WHERE id = $1
            RETURNING id, first_name, last_name, email
            "#,
        )
        .bind(id)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// # Returns
    ///
    /// True if user was deleted, false if user didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every user, oldest id first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Counts total number of users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
