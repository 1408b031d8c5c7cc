//! Admin gate tooling.

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};

/// Hash an operator password for `PIXELPUNK_ADMIN_PASSWORD_HASH`.
///
/// # Errors
///
/// Returns an error if hashing fails.
#[allow(clippy::print_stdout)]
pub fn hash_password(password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("hashing failed: {e}"))?;

    println!("{hash}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use argon2::{PasswordVerifier, password_hash::PasswordHash};

    use super::*;

    #[test]
    fn test_hash_verifies_roundtrip() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"vault-operator-9", &salt)
            .expect("hash")
            .to_string();

        let parsed = PasswordHash::new(&hash).expect("parse");
        assert!(
            Argon2::default()
                .verify_password(b"vault-operator-9", &parsed)
                .is_ok()
        );
    }
}
