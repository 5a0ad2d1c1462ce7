/// Database seam of the registration workflow
///
/// The workflow never touches a pool directly. It is handed a
/// [`RegistrationStore`], which makes the PostgreSQL implementation
/// swappable for an in-memory one in tests.
///
/// # Transaction
///
/// ```text
/// BEGIN
///   INSERT INTO "user" (...) RETURNING id     -- failure: ROLLBACK, no patient insert
///   INSERT INTO patient (..., user_id, ...)   -- failure: ROLLBACK, user row discarded
/// COMMIT
/// ```
///
/// The generated id comes from `RETURNING` on the same connection, so it
/// cannot belong to another request.

use crate::{
    db::pool::health_check,
    models::{
        patient::{CreatePatient, Patient},
        user::{CreateUser, User},
    },
    registration::RegistrationError,
};
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

/// Patient-table half of a registration, before the user id is known
#[derive(Debug, Clone)]
pub struct NewPatientProfile {
    pub health_insurance: String,
    pub area: String,
    pub address: String,
}

impl NewPatientProfile {
    fn for_user(&self, user_id: i64) -> CreatePatient {
        CreatePatient {
            health_insurance: self.health_insurance.clone(),
            user_id,
            area: self.area.clone(),
            address: self.address.clone(),
        }
    }
}

/// Outcome of a committed registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredPatient {
    /// Id generated for the new user row; also the patient's `user_id`
    pub user_id: i64,

    pub health_insurance: String,
}

/// Persistence operations the registration workflow needs
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Inserts the user, then the patient linked to the generated id
    ///
    /// Either both rows are stored or neither is.
    async fn register(
        &self,
        user: CreateUser,
        profile: NewPatientProfile,
    ) -> Result<RegisteredPatient, RegistrationError>;

    /// Checks that the backing database answers
    async fn ping(&self) -> Result<(), RegistrationError>;
}

/// Which insert a failed registration stopped at
#[derive(Debug, Clone, Copy)]
enum Stage {
    User,
    Patient,
}

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgRegistrationStore {
    pool: PgPool,
}

impl PgRegistrationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_rows(
        tx: &mut Transaction<'_, Postgres>,
        user: &CreateUser,
        profile: &NewPatientProfile,
    ) -> Result<i64, (Stage, sqlx::Error)> {
        let user_id = User::create(&mut **tx, user)
            .await
            .map_err(|e| (Stage::User, e))?;

        Patient::create(&mut **tx, &profile.for_user(user_id))
            .await
            .map_err(|e| (Stage::Patient, e))?;

        Ok(user_id)
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    async fn register(
        &self,
        user: CreateUser,
        profile: NewPatientProfile,
    ) -> Result<RegisteredPatient, RegistrationError> {
        let mut tx = self.pool.begin().await?;

        match Self::insert_rows(&mut tx, &user, &profile).await {
            Ok(user_id) => {
                tx.commit().await?;
                debug!(user_id, "Registration committed");

                Ok(RegisteredPatient {
                    user_id,
                    health_insurance: profile.health_insurance,
                })
            }
            Err((stage, err)) => {
                debug!(?stage, error = %err, "Registration insert failed, rolling back");

                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }

                Err(err.into())
            }
        }
    }

    async fn ping(&self) -> Result<(), RegistrationError> {
        health_check(&self.pool).await?;
        Ok(())
    }
}
