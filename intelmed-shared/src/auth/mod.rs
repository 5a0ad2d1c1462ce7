/// Credential handling for IntelMed
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
///
/// Passwords submitted through the registration form are hashed before they
/// reach the database. The plaintext never leaves the request.

pub mod password;
