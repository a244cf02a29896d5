//! Signed envelope: encrypt + sign outbound, verify + decrypt inbound.

use core::fmt::Display;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::error::CryptoError;
use crate::{cipher, codec, signature};

/// Acknowledgement body the platform expects in reply to a callback.
pub const SUCCESS_REPLY: &str = "success";

/// The four-field payload exchanged with the platform.
///
/// `nonce` here is the caller's anti-replay value that goes into the
/// signature. The random prefix inside the encrypted frame is separate and
/// never leaves the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "msg_signature")]
    pub signature: String,
    #[serde(rename = "encrypt")]
    pub ciphertext: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    pub nonce: String,
}

/// Outbound request as received from an upstream caller, with every field
/// optional so absence can be reported precisely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealRequest {
    pub plaintext: Option<String>,
    #[serde(alias = "timeStamp")]
    pub timestamp: Option<String>,
    pub nonce: Option<String>,
}

/// Encrypts and decrypts callback messages for one configured identity.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct CallbackCrypto {
    creds: Credentials,
}

impl CallbackCrypto {
    /// Fails with `InvalidAesKey` if `encoding_aes_key` is not a valid
    /// 43-character key.
    pub fn new(
        token: impl Into<String>,
        encoding_aes_key: &str,
        owner_key: impl Into<String>,
    ) -> Result<Self, CryptoError> {
        Ok(Self::from_credentials(Credentials::new(
            token,
            encoding_aes_key,
            owner_key,
        )?))
    }

    pub fn from_credentials(creds: Credentials) -> Self {
        Self { creds }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.creds
    }

    /// Encrypt `plaintext` into base64 ciphertext under a fresh random prefix.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let random = cipher::random_prefix()?;
        let raw = codec::encode(&random, plaintext, &self.creds)?;
        Ok(STANDARD.encode(raw))
    }

    /// Decrypt base64 ciphertext. Does not check any signature.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let raw = STANDARD
            .decode(ciphertext)
            .map_err(|_| CryptoError::DecryptionFailure)?;
        codec::decode(&raw, &self.creds).map_err(|e| {
            if e == CryptoError::IdentityMismatch {
                warn!(
                    code = e.code(),
                    owner_key = %self.creds.owner_key(),
                    "decrypted frame belongs to a different owner"
                );
            }
            e
        })
    }

    /// Signature over this identity's token and the given values.
    pub fn signature(&self, timestamp: &str, nonce: &str, ciphertext: &str) -> String {
        signature::sign(self.creds.token(), timestamp, nonce, ciphertext)
    }

    /// Check a claimed signature for the given values.
    pub fn verify(&self, timestamp: &str, nonce: &str, ciphertext: &str, claimed: &str) -> bool {
        signature::verify(self.creds.token(), timestamp, nonce, ciphertext, claimed)
    }

    /// Encrypt and sign `plaintext` for delivery to the platform.
    ///
    /// An empty plaintext is a valid message; `timestamp` and `nonce` must be
    /// non-empty.
    pub fn seal(
        &self,
        plaintext: &str,
        timestamp: impl Display,
        nonce: &str,
    ) -> Result<Envelope, CryptoError> {
        let timestamp = timestamp.to_string();
        if timestamp.is_empty() {
            return Err(CryptoError::MissingTimestamp);
        }
        if nonce.is_empty() {
            return Err(CryptoError::MissingNonce);
        }

        let ciphertext = self.encrypt(plaintext)?;
        let signature = self.signature(&timestamp, nonce, &ciphertext);
        debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "sealed callback envelope"
        );

        Ok(Envelope {
            signature,
            ciphertext,
            timestamp,
            nonce: nonce.to_owned(),
        })
    }

    /// [`seal`](Self::seal) with missing fields reported by name.
    pub fn seal_request(&self, req: &SealRequest) -> Result<Envelope, CryptoError> {
        let plaintext = req.plaintext.as_deref().ok_or(CryptoError::MissingPlaintext)?;
        let timestamp = req.timestamp.as_deref().ok_or(CryptoError::MissingTimestamp)?;
        let nonce = req.nonce.as_deref().ok_or(CryptoError::MissingNonce)?;
        self.seal(plaintext, timestamp, nonce)
    }

    /// Verify the signature, then decrypt. Nothing is decrypted unless the
    /// signature matches.
    pub fn open_parts(
        &self,
        signature: &str,
        timestamp: &str,
        nonce: &str,
        ciphertext: &str,
    ) -> Result<String, CryptoError> {
        if !self.verify(timestamp, nonce, ciphertext, signature) {
            warn!(
                code = CryptoError::SignatureMismatch.code(),
                timestamp,
                nonce,
                "callback signature mismatch"
            );
            return Err(CryptoError::SignatureMismatch);
        }

        let plaintext = self.decrypt(ciphertext)?;
        debug!(plaintext_len = plaintext.len(), "opened callback envelope");
        Ok(plaintext)
    }

    /// [`open_parts`](Self::open_parts) for a deserialized envelope.
    pub fn open(&self, envelope: &Envelope) -> Result<String, CryptoError> {
        self.open_parts(
            &envelope.signature,
            &envelope.timestamp,
            &envelope.nonce,
            &envelope.ciphertext,
        )
    }

    /// Sealed `"success"` acknowledgement for a callback request.
    pub fn success_reply(
        &self,
        timestamp: impl Display,
        nonce: &str,
    ) -> Result<Envelope, CryptoError> {
        self.seal(SUCCESS_REPLY, timestamp, nonce)
    }
}
