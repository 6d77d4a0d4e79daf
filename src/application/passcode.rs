//! One-time order passcodes.
//!
//! A passcode is a short access code shared with the buyer, not a long-lived
//! secret: it is drawn from a time-seeded generator and hashed with argon2 at
//! the cost configured in [`PasscodeConfig`] (the minimum by default). Raise
//! the cost for stronger brute-force resistance.

use std::time::{SystemTime, UNIX_EPOCH};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PasscodeConfig;
use crate::domain::errors::DomainError;

pub const PASSCODE_LENGTH: usize = 5;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_passcode() -> String {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    let mut rng = StdRng::seed_from_u64(seed);

    (0..PASSCODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone)]
pub struct PasscodeHasher {
    argon2: Argon2<'static>,
}

impl PasscodeHasher {
    pub fn new(config: PasscodeConfig) -> Result<Self, DomainError> {
        let params = Params::new(config.memory_kib, config.iterations, 1, None)
            .map_err(|e| DomainError::Internal(format!("invalid passcode hash cost: {}", e)))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Returns the PHC string of a salted hash of `passcode`.
    pub fn hash(&self, passcode: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(passcode.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Internal(format!("passcode hashing failed: {}", e)))
    }

    /// Checks `passcode` against a stored PHC string. The comparison is the
    /// primitive's constant-time one.
    pub fn verify(&self, stored_hash: &str, passcode: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| DomainError::Internal(format!("invalid stored passcode hash: {}", e)))?;

        match self.argon2.verify_password(passcode.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::Internal(format!(
                "passcode verification failed: {}",
                e
            ))),
        }
    }
}
