//! Password hashing for stored user credentials.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::TripsError;

pub fn hash_password(password: &str) -> Result<String, TripsError> {
    if password.is_empty() {
        return Err(TripsError::InvalidInput("Password must not be empty".to_string()));
    }
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TripsError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, TripsError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| TripsError::InvalidInput(format!("Invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Password123").unwrap();
        assert_ne!(hash, "Password123");
        assert!(verify_password("Password123", &hash).unwrap());
        assert!(!verify_password("password123", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Password123").unwrap();
        let b = hash_password("Password123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            hash_password(""),
            Err(TripsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_garbage_hash_is_invalid_input() {
        assert!(matches!(
            verify_password("x", "not-a-phc-string"),
            Err(TripsError::InvalidInput(_))
        ));
    }
}
