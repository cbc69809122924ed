//! Argon2 password hashing for provisioned admin credentials.

use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::{ClinicError, ClinicResult};

/// Hash a plaintext password with Argon2id using a random salt.
///
/// Every call produces a different PHC string for the same input.
pub fn hash_password(password: &str) -> ClinicResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ClinicError::PasswordHash(format!("Failed to hash password: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verify a plaintext password against an Argon2 hash string.
pub fn verify_password(password: &str, hash: &str) -> ClinicResult<()> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ClinicError::PasswordHash(format!("Invalid password hash: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| ClinicError::InvalidCredentials)?;

    Ok(())
}
