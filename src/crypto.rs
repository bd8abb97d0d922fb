use std::sync::{Arc, OnceLock};

use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::Rng;
use rand::rngs::OsRng;

use crate::AuthError;

/// Length of a session id in characters.
///
/// 40 alphanumeric characters carry about 238 bits of entropy, far above the
/// point where collisions matter.
pub const SESSION_ID_LENGTH: usize = 40;

/// Length of a user id in characters (about 95 bits).
pub const USER_ID_LENGTH: usize = 16;

/// Upper bound on anything we accept as a session id before touching storage.
pub const MAX_SESSION_ID_LENGTH: usize = 255;

/// Trait for password hashing and verification.
///
/// The default implementation is [`Argon2Hasher`].
///
/// # Example
///
/// ```rust
/// use tessera::crypto::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash("mypassword").unwrap();
/// assert!(hasher.verify("mypassword", &hash).unwrap());
/// assert!(!hasher.verify("wrongpassword", &hash).unwrap());
/// ```
pub trait PasswordHasher: Send + Sync {
    /// Hash a password into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a PHC string in constant time.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if the hash is malformed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;

    /// A hash of a throwaway password, made with this hasher's own cost
    /// parameters. Verifying against it costs the same as a real login.
    fn dummy_hash(&self) -> Option<String> {
        self.hash(DUMMY_PASSWORD).ok()
    }
}

const DUMMY_PASSWORD: &str = "tessera-dummy-password";

/// Argon2id password hasher.
///
/// Defaults follow the argon2 crate's recommended minimum: 19 MiB, two
/// passes, one lane.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    /// Memory cost in KiB
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
    /// Shared by clones so the dummy hash is computed once per configuration.
    dummy: Arc<OnceLock<Option<String>>>,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new(19456, 2, 1)
    }
}

impl Argon2Hasher {
    #[must_use]
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
            dummy: Arc::new(OnceLock::new()),
        }
    }

    /// 64 MiB, three passes, four lanes.
    #[must_use]
    pub fn production() -> Self {
        Self::new(65536, 3, 4)
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| AuthError::PasswordHashError)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;

        // params come from the PHC string, not from self
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn dummy_hash(&self) -> Option<String> {
        self.dummy
            .get_or_init(|| self.hash(DUMMY_PASSWORD).ok())
            .clone()
    }
}

/// Runs a throwaway verification so a login for an unknown username costs
/// about as much as one with a wrong password.
pub fn verify_dummy<H: PasswordHasher>(hasher: &H, password: &str) {
    if let Some(hash) = hasher.dummy_hash() {
        let _ = hasher.verify(password, &hash);
    }
}

/// Generates a cryptographically secure alphanumeric string.
///
/// Each character carries about 5.95 bits of entropy.
///
/// ```rust
/// use tessera::crypto::generate_id;
///
/// let id = generate_id(40);
/// assert_eq!(id.len(), 40);
/// ```
pub fn generate_id(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

pub fn generate_session_id() -> String {
    generate_id(SESSION_ID_LENGTH)
}

pub fn generate_user_id() -> String {
    generate_id(USER_ID_LENGTH)
}

/// Whether `value` could be an id we issued. Used to short-circuit lookups for
/// empty or garbage cookie values.
pub fn is_well_formed_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_SESSION_ID_LENGTH
        && value.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_length() {
        assert_eq!(generate_id(16).len(), 16);
        assert_eq!(generate_session_id().len(), SESSION_ID_LENGTH);
        assert_eq!(generate_user_id().len(), USER_ID_LENGTH);
    }

    #[test]
    fn test_generate_id_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }

    #[test]
    fn test_generate_id_alphanumeric() {
        let id = generate_id(100);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_well_formed_id() {
        assert!(is_well_formed_id(&generate_session_id()));
        assert!(!is_well_formed_id(""));
        assert!(!is_well_formed_id("../etc/passwd"));
        assert!(!is_well_formed_id("abc; DROP TABLE"));
        assert!(!is_well_formed_id(&"a".repeat(MAX_SESSION_ID_LENGTH + 1)));
    }

    #[test]
    fn test_argon2_round_trip() {
        let hasher = Argon2Hasher::new(1024, 1, 1);
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_argon2_malformed_hash() {
        let hasher = Argon2Hasher::default();
        assert_eq!(
            hasher.verify("password", "not-a-phc-string"),
            Err(AuthError::PasswordHashError)
        );
    }

    #[test]
    fn test_verify_dummy_does_not_panic() {
        verify_dummy(&Argon2Hasher::new(1024, 1, 1), "whatever");
    }

    fn params_segment(hash: &str) -> &str {
        hash.split('$').nth(3).unwrap()
    }

    #[test]
    fn test_dummy_hash_uses_hasher_params() {
        let hasher = Argon2Hasher::production();
        let real = hasher.hash("correct horse").unwrap();
        let dummy = hasher.dummy_hash().unwrap();

        assert_eq!(params_segment(&dummy), "m=65536,t=3,p=4");
        assert_eq!(params_segment(&dummy), params_segment(&real));
    }

    #[test]
    fn test_dummy_hash_cached_across_clones() {
        let hasher = Argon2Hasher::new(1024, 1, 1);
        let first = hasher.dummy_hash().unwrap();
        assert_eq!(hasher.clone().dummy_hash().unwrap(), first);
        assert_eq!(params_segment(&first), "m=1024,t=1,p=1");
    }
}
