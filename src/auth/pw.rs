//! Password hashing.
//!
//! One Argon2id hasher is built on first use and shared. Logins for unknown
//! users still pay for a full verification against a throwaway hash, so
//! response time does not reveal whether a username exists.

use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
    Algorithm, Argon2, Params, Version,
};
use crate::errors::{AppError, Result};

/// 19 MiB, two passes, one lane.
const MEMORY_KIB: u32 = 19 * 1024;
const PASSES: u32 = 2;
const LANES: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Password behind the hash unknown-user logins are checked against.
const DUMMY_PASSWORD: &str = "no account behind this hash";

static HASHER: OnceLock<std::result::Result<Argon2<'static>, argon2::Error>> = OnceLock::new();
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn hasher() -> Result<&'static Argon2<'static>> {
    HASHER
        .get_or_init(|| {
            let params = Params::new(MEMORY_KIB, PASSES, LANES, Some(OUTPUT_LEN))?;
            Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
        })
        .as_ref()
        .map_err(|e| AppError::ArgonError(e.clone()))
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = hasher()?.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;
    match hasher()?.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::PasswordHashError(e)),
    }
}

/// Burn the same work as a real verification when there is no stored hash to
/// check. The outcome is always a mismatch.
pub fn verify_dummy(password: &str) -> Result<()> {
    let hash = match DUMMY_HASH.get() {
        Some(hash) => hash,
        None => {
            let fresh = hash_password(DUMMY_PASSWORD)?;
            DUMMY_HASH.get_or_init(|| fresh)
        }
    };
    verify_password(password, hash)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH.get().map(String::as_str)
}
