use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Failure while hashing or parsing a stored credential. A plain mismatch is
/// not an error; it is reported through the `bool` return of
/// [`verify_password`].
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential processing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Hash a raw password with a freshly generated salt.
pub(crate) fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(CredentialError::Hash)
}

/// Recompute and compare against a stored hash. `Ok(false)` means the
/// password simply does not match; `Err` means the stored hash is unusable.
pub(crate) fn verify_password(password: &str, stored: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(stored).map_err(CredentialError::Hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(CredentialError::Hash(err)),
    }
}
