/// Database models for IntelMed
///
/// # Models
///
/// - `user`: Accounts with contact details and a hashed password
/// - `patient`: Insurance and address profile owned by exactly one user
///
/// Every query function takes a generic `PgExecutor`, so the same code runs
/// against the pool or inside a transaction.

pub mod patient;
pub mod user;
