/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE "user" (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     surname VARCHAR(100) NOT NULL,
///     sex VARCHAR(16) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     phone_number VARCHAR(32) NOT NULL,
///     password VARCHAR(255) NOT NULL,      -- Argon2id PHC string
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use intelmed_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user_id = User::create(
///     &pool,
///     &CreateUser {
///         name: "Jane".to_string(),
///         surname: "Doe".to_string(),
///         sex: "F".to_string(),
///         email: "jane@example.com".to_string(),
///         phone_number: "555-0100".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
///
/// let user = User::find_by_id(&pool, user_id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// A row of the `user` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Generated by the database on insert
    pub id: i64,

    /// First name
    pub name: String,

    /// Last name
    pub surname: String,

    /// Free-form sex code as submitted (e.g. "F", "M")
    pub sex: String,

    /// Email address, unique across users
    pub email: String,

    pub phone_number: String,

    /// Argon2id hash of the password
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

/// Input for inserting a user
///
/// Fields are bound in the column order
/// name, surname, sex, email, phone_number, password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub surname: String,
    pub sex: String,
    pub email: String,
    pub phone_number: String,

    /// Argon2id hash, never the plaintext password
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Inserts a user and returns the generated id
    ///
    /// Accepts any executor so it can run inside the registration transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists, a value exceeds its
    /// column width, or the connection fails.
    pub async fn create<'e, E>(executor: E, data: &CreateUser) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO "user" (name, surname, sex, email, phone_number, password)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.surname)
        .bind(&data.sex)
        .bind(&data.email)
        .bind(&data.phone_number)
        .bind(&data.password_hash)
        .fetch_one(executor)
        .await?;

        Ok(id)
    }

    /// Finds a user by ID
    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, surname, sex, email, phone_number, password, created_at
            FROM "user"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Finds a user by exact email address
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, surname, sex, email, phone_number, password, created_at
            FROM "user"
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await
    }
}
