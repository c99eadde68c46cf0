use argon2::{
    password_hash::{rand_core::OsRng, Error as Argon2Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::Lazy;

use crate::errors::PasswordError;

const MEMORY_COST_KIB: u32 = 15_000;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Hash checked when the username is unknown, so that a miss costs as much
/// as a wrong password.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("talent-dummy-password").ok());

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into the argon2id PHC string stored in `users.password_hash`.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingError(e.to_string()))
}

/// Checks `password` against a stored PHC string. The parameters are read
/// from the hash itself.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

    match hasher()?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(Argon2Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationError(e.to_string())),
    }
}

/// Burns one verification for a sign-in attempt on an unknown account.
pub fn verify_dummy(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}
