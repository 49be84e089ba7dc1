//! Password-based protection for applicant personal data.
//!
//! The scoring core never calls into this module; it only reports that the service is
//! active through the fixed data-security score.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CIPHER_SUITE: &str = "AES-256-GCM";
pub const KDF_ALGORITHM: &str = "PBKDF2-HMAC-SHA256";
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Placeholder returned by [`open_fields`] for a field that could not be decrypted.
pub const DECRYPTION_FAILED_MARKER: &str = "[decryption failed]";

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const PASSWORD_SALT_LEN: usize = 16;

/// Base64-encoded ciphertext with the nonce and salt needed to open it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedField {
    pub ciphertext: String,
    pub iv: String,
    pub salt: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfidentialityError {
    #[error("encryption failed")]
    Encryption,
    #[error("decryption failed: invalid password or corrupted data")]
    Decryption,
    #[error("sealed field is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("system randomness unavailable")]
    Randomness,
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Capability the rest of the system is handed for protecting personal fields.
pub trait ConfidentialityService: Send + Sync {
    fn encrypt(&self, plaintext: &str, password: &str) -> Result<SealedField, ConfidentialityError>;
    fn decrypt(&self, sealed: &SealedField, password: &str) -> Result<String, ConfidentialityError>;
    fn hash_password(&self, password: &str) -> Result<String, ConfidentialityError>;
    fn verify_password(&self, password: &str, digest: &str) -> bool;
}

/// AES-256-GCM vault keyed by PBKDF2 with a fresh salt and nonce per field.
pub struct AesGcmVault {
    iterations: u32,
    rng: SystemRandom,
}

impl AesGcmVault {
    /// Zero iterations fall back to [`DEFAULT_KDF_ITERATIONS`].
    pub fn new(iterations: u32) -> Self {
        let iterations = if iterations > 0 {
            iterations
        } else {
            DEFAULT_KDF_ITERATIONS
        };

        Self {
            iterations,
            rng: SystemRandom::new(),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    fn random_bytes<const N: usize>(&self) -> Result<[u8; N], ConfidentialityError> {
        let mut bytes = [0u8; N];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| ConfidentialityError::Randomness)?;
        Ok(bytes)
    }

    fn cipher(&self, password: &str, salt: &[u8]) -> Result<Aes256Gcm, ConfidentialityError> {
        let iterations = NonZeroU32::new(self.iterations).unwrap_or(NonZeroU32::MIN);
        let mut key = [0u8; KEY_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            salt,
            password.as_bytes(),
            &mut key,
        );
        Aes256Gcm::new_from_slice(&key).map_err(|_| ConfidentialityError::Encryption)
    }
}

impl Default for AesGcmVault {
    fn default() -> Self {
        Self::new(DEFAULT_KDF_ITERATIONS)
    }
}

impl ConfidentialityService for AesGcmVault {
    fn encrypt(&self, plaintext: &str, password: &str) -> Result<SealedField, ConfidentialityError> {
        let salt = self.random_bytes::<SALT_LEN>()?;
        let iv = self.random_bytes::<NONCE_LEN>()?;

        let ciphertext = self
            .cipher(password, &salt)?
            .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
            .map_err(|_| ConfidentialityError::Encryption)?;

        Ok(SealedField {
            ciphertext: STANDARD.encode(ciphertext),
            iv: STANDARD.encode(iv),
            salt: STANDARD.encode(salt),
        })
    }

    fn decrypt(&self, sealed: &SealedField, password: &str) -> Result<String, ConfidentialityError> {
        let salt = STANDARD.decode(&sealed.salt)?;
        let iv = STANDARD.decode(&sealed.iv)?;
        let ciphertext = STANDARD.decode(&sealed.ciphertext)?;

        if iv.len() != NONCE_LEN {
            return Err(ConfidentialityError::Decryption);
        }

        let plaintext = self
            .cipher(password, &salt)?
            .decrypt(Nonce::from_slice(&iv), ciphertext.as_slice())
            .map_err(|_| ConfidentialityError::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| ConfidentialityError::Decryption)
    }

    fn hash_password(&self, password: &str) -> Result<String, ConfidentialityError> {
        let salt_bytes = self.random_bytes::<PASSWORD_SALT_LEN>()?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| ConfidentialityError::Hashing(err.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| ConfidentialityError::Hashing(err.to_string()))
    }

    fn verify_password(&self, password: &str, digest: &str) -> bool {
        PasswordHash::new(digest)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Encrypt every non-empty personal field under the same password.
pub fn seal_fields<S>(
    service: &S,
    fields: &BTreeMap<String, String>,
    password: &str,
) -> Result<BTreeMap<String, SealedField>, ConfidentialityError>
where
    S: ConfidentialityService + ?Sized,
{
    let mut sealed = BTreeMap::new();
    for (name, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
        sealed.insert(name.clone(), service.encrypt(value, password)?);
    }
    Ok(sealed)
}

/// Decrypt each field independently; failures yield [`DECRYPTION_FAILED_MARKER`] for that
/// field only.
pub fn open_fields<S>(
    service: &S,
    sealed: &BTreeMap<String, SealedField>,
    password: &str,
) -> BTreeMap<String, String>
where
    S: ConfidentialityService + ?Sized,
{
    sealed
        .iter()
        .map(|(name, field)| {
            let value = service.decrypt(field, password).unwrap_or_else(|err| {
                warn!(field = %name, error = %err, "personal field could not be decrypted");
                DECRYPTION_FAILED_MARKER.to_string()
            });
            (name.clone(), value)
        })
        .collect()
}
