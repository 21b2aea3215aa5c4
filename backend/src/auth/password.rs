//! Password digests using HMAC-SHA512
//!
//! Each user gets a fresh random salt which is used as the HMAC key over
//! the UTF-8 password. Only the salt and the resulting MAC are stored.

use anyhow::Result;
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Salt length in bytes (the HMAC-SHA512 block size)
pub const SALT_LEN: usize = 128;

/// Stored password verifier
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Derive a digest for a new password with a freshly generated salt
    pub fn hash(password: &str) -> Result<PasswordDigest> {
        let mut salt = vec![0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let hash = Self::mac(password, &salt)?.finalize().into_bytes().to_vec();
        Ok(PasswordDigest { salt, hash })
    }

    /// Verify a password against a stored digest.
    ///
    /// The comparison runs in constant time.
    pub fn verify(password: &str, digest: &PasswordDigest) -> Result<bool> {
        Ok(Self::mac(password, &digest.salt)?
            .verify_slice(&digest.hash)
            .is_ok())
    }

    fn mac(password: &str, salt: &[u8]) -> Result<HmacSha512> {
        let mut mac = HmacSha512::new_from_slice(salt)
            .map_err(|e| anyhow::anyhow!("Failed to key password MAC: {}", e))?;
        mac.update(password.as_bytes());
        Ok(mac)
    }
}
