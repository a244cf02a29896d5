//! Credentials: token, AES key, sender identity tag.
//!
//! key = base64(encoding_aes_key || "=")   (must be exactly 32 bytes)
//! iv  = key[..16]

use core::fmt;

use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::CryptoError;
use crate::wire::{AES_KEY_BYTES, ENCODED_AES_KEY_CHARS, IV_BYTES};

// The platform's key generator does not zero the unused low bits of the last
// symbol, so the strict engine would reject real keys.
const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// AES-256 key material. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AesKey([u8; AES_KEY_BYTES]);

impl AesKey {
    /// Decode the 43-character `encoding_aes_key` from the platform console.
    pub fn from_encoded(encoded: &str) -> Result<Self, CryptoError> {
        if encoded.len() != ENCODED_AES_KEY_CHARS {
            return Err(CryptoError::InvalidAesKey("encoded key must be 43 characters"));
        }

        let mut padded = Zeroizing::new(String::with_capacity(ENCODED_AES_KEY_CHARS + 1));
        padded.push_str(encoded);
        padded.push('=');

        let decoded = Zeroizing::new(
            KEY_ENGINE
                .decode(padded.as_bytes())
                .map_err(|_| CryptoError::InvalidAesKey("encoded key is not valid base64"))?,
        );

        let bytes: [u8; AES_KEY_BYTES] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidAesKey("decoded key must be 32 bytes"))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; AES_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_BYTES] {
        &self.0
    }

    /// CBC initialization vector: the first 16 key bytes, fixed for the key's lifetime.
    pub fn iv(&self) -> [u8; IV_BYTES] {
        let mut iv = [0u8; IV_BYTES];
        iv.copy_from_slice(&self.0[..IV_BYTES]);
        iv
    }
}

impl fmt::Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AesKey(<redacted>)")
    }
}

/// Immutable per-identity credentials shared by every seal/open call.
#[derive(Clone)]
pub struct Credentials {
    token: String,
    key: AesKey,
    owner_key: String,
}

impl Credentials {
    /// `owner_key` is the sender identity tag: the corp id for internal
    /// applications, or the suite key for third-party suites.
    pub fn new(
        token: impl Into<String>,
        encoding_aes_key: &str,
        owner_key: impl Into<String>,
    ) -> Result<Self, CryptoError> {
        Ok(Self::from_key(token, AesKey::from_encoded(encoding_aes_key)?, owner_key))
    }

    pub fn from_key(token: impl Into<String>, key: AesKey, owner_key: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            key,
            owner_key: owner_key.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn key(&self) -> &AesKey {
        &self.key
    }

    pub fn owner_key(&self) -> &str {
        &self.owner_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("key", &self.key)
            .field("owner_key", &self.owner_key)
            .finish()
    }
}
