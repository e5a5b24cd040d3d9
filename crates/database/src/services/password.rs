use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{ServiceError, ServiceResult};

/// Hashes a password into a PHC string with a fresh salt
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {e}")))
}

/// Checks a password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| ServiceError::Internal(format!("Failed to parse password hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
