/// API route handlers
///
/// - `health`: Liveness and readiness endpoints
/// - `patients`: Patient registration form endpoint

pub mod health;
pub mod patients;
