/// Patient model and database operations
///
/// A patient row extends exactly one user with insurance and address data.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE patient (
///     user_id BIGINT PRIMARY KEY REFERENCES "user" (id) ON DELETE CASCADE,
///     health_insurance VARCHAR(64) NOT NULL UNIQUE,
///     area VARCHAR(100) NOT NULL,
///     address VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// A row of the `patient` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Patient {
    /// Health insurance number, unique across patients
    pub health_insurance: String,

    /// Owning user
    pub user_id: i64,

    pub area: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatient {
    pub health_insurance: String,
    pub user_id: i64,
    pub area: String,
    pub address: String,
}

impl Patient {
    /// Inserts a patient profile for an existing user
    ///
    /// Columns are bound in the order health_insurance, user_id, area, address.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist (foreign key), the user
    /// already has a profile, the insurance number is taken, or the
    /// connection fails.
    pub async fn create<'e, E>(executor: E, data: &CreatePatient) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO patient (health_insurance, user_id, area, address)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&data.health_insurance)
        .bind(data.user_id)
        .bind(&data.area)
        .bind(&data.address)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Finds the profile belonging to a user
    pub async fn find_by_user_id<'e, E>(executor: E, user_id: i64) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Patient>(
            r#"
            SELECT health_insurance, user_id, area, address, created_at
            FROM patient
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await
    }

    /// Finds the profile holding an insurance number
    pub async fn find_by_health_insurance<'e, E>(
        executor: E,
        health_insurance: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Patient>(
            r#"
            SELECT health_insurance, user_id, area, address, created_at
            FROM patient
            WHERE health_insurance = $1
            "#,
        )
        .bind(health_insurance)
        .fetch_optional(executor)
        .await
    }
}
