/// Patient registration workflow
///
/// Turns one submitted form into a `user` row and a linked `patient` row.
///
/// ```text
/// PatientRegistration
///   -> sanitize every field
///   -> check column widths        (RegistrationError::Validation)
///   -> hash password (Argon2id)   (RegistrationError::Hashing)
///   -> RegistrationStore::register
///        user insert -> patient insert, one transaction
///                                 (RegistrationError::Integrity / Connectivity / Database)
///   -> RegisteredPatient
/// ```
///
/// # Example
///
/// ```no_run
/// use intelmed_shared::registration::{register_patient, PatientRegistration, PgRegistrationStore};
/// use sqlx::PgPool;
/// use std::sync::Arc;
/// use tokio::sync::Semaphore;
///
/// # async fn example(pool: PgPool, form: PatientRegistration) -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgRegistrationStore::new(pool);
/// let hash_permits = Arc::new(Semaphore::new(4));
/// let registered = register_patient(&store, &hash_permits, form).await?;
/// println!("Registered user {}", registered.user_id);
/// # Ok(())
/// # }
/// ```

pub mod error;
pub mod store;
pub mod submission;

pub use error::{FieldError, RegistrationError, Violation};
pub use store::{NewPatientProfile, PgRegistrationStore, RegisteredPatient, RegistrationStore};
pub use submission::PatientRegistration;

use crate::{auth::password::hash_password_async, models::user::CreateUser};
use std::sync::Arc;
use tokio::sync::Semaphore;
use validator::Validate;

/// Registers one patient through `store`
///
/// The store is only called once the submission has passed the width checks
/// and the password has been hashed. Hashing waits for one of `hash_permits`.
///
/// # Errors
///
/// Returns a [`RegistrationError`] describing the first failure. Nothing is
/// persisted when an error is returned.
pub async fn register_patient(
    store: &dyn RegistrationStore,
    hash_permits: &Arc<Semaphore>,
    submission: PatientRegistration,
) -> Result<RegisteredPatient, RegistrationError> {
    let submission = submission.sanitized();
    submission.validate()?;

    let PatientRegistration {
        health_insurance_number,
        area,
        address,
        firstname,
        lastname,
        sex,
        phonenumber,
        email,
        password,
    } = submission;

    let password_hash = hash_password_async(password, hash_permits.clone()).await?;

    let user = CreateUser {
        name: firstname,
        surname: lastname,
        sex,
        email,
        phone_number: phonenumber,
        password_hash,
    };
    let profile = NewPatientProfile {
        health_insurance: health_insurance_number,
        area,
        address,
    };

    store.register(user, profile).await
}
