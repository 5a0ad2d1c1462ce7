/// Password hashing using Argon2id
///
/// Registration stores the PHC string produced here in the `password` column
/// of the `user` table.
///
/// # Parameters
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash, 16-byte random salt
///
/// # Example
///
/// ```
/// use intelmed_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("secret")?;
/// assert!(hash.starts_with("$argon2id$"));
/// assert!(verify_password("secret", &hash)?);
/// assert!(!verify_password("Secret", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, ParamsBuilder, Version,
};
use std::sync::Arc;
use tokio::sync::Semaphore;

const MEMORY_COST_KIB: u32 = 65536;
const TIME_COST: u32 = 3;
const PARALLELISM: u32 = 4;
const OUTPUT_LEN: usize = 32;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn params() -> Result<Params, PasswordError> {
    ParamsBuilder::new()
        .m_cost(MEMORY_COST_KIB)
        .t_cost(TIME_COST)
        .p_cost(PARALLELISM)
        .output_len(OUTPUT_LEN)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))
}

/// Hashes a password with Argon2id and a fresh random salt
///
/// Returns the PHC string, e.g. `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`.
/// Empty passwords are hashed like any other value.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params()?);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Hashes a password on tokio's blocking thread pool
///
/// Each hash holds 64 MB while it runs, so the caller passes a semaphore that
/// caps how many hashes run at once. The permit moves into the blocking task
/// and is released when hashing ends, even if the awaiting request was
/// dropped.
///
/// The input is hashed byte for byte. Registration strips control characters
/// from the password first, so anything verifying against these hashes must
/// apply the same stripping to the candidate password.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails or `permits` is closed
pub async fn hash_password_async(
    password: String,
    permits: Arc<Semaphore>,
) -> Result<String, PasswordError> {
    let permit = permits
        .acquire_owned()
        .await
        .map_err(|_| PasswordError::HashError("Hashing limiter is closed".to_string()))?;

    tokio::task::spawn_blocking(move || {
        let hash = hash_password(&password);
        drop(permit);
        hash
    })
    .await
    .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))?
}

/// Verifies a password against a stored PHC hash
///
/// Parameters are read from the hash itself. Comparison is constant-time.
///
/// # Returns
///
/// `Ok(true)` if the password matches, `Ok(false)` if it doesn't
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if `hash` cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}
