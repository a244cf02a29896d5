//! Error types for callback crypto.
//!
//! Every failure kind is its own variant so callers can branch on it. The
//! numeric codes match the ones the platform documents for its own SDKs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("plaintext is missing")]
    MissingPlaintext,

    #[error("timestamp is missing")]
    MissingTimestamp,

    #[error("nonce is missing")]
    MissingNonce,

    /// The configured `encoding_aes_key` is not 43 base64 characters
    /// decoding to a 32-byte key.
    #[error("invalid aes key: {0}")]
    InvalidAesKey(&'static str),

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("encryption failed")]
    EncryptionFailure,

    #[error("decryption failed")]
    DecryptionFailure,

    #[error("decrypted frame is malformed: {0}")]
    FrameParseFailure(&'static str),

    #[error("sender identity mismatch")]
    IdentityMismatch,
}

impl CryptoError {
    /// Platform error code for this failure.
    pub fn code(&self) -> u32 {
        match self {
            Self::MissingPlaintext => 900001,
            Self::MissingTimestamp => 900002,
            Self::MissingNonce => 900003,
            Self::InvalidAesKey(_) => 900004,
            Self::SignatureMismatch => 900006,
            Self::EncryptionFailure => 900007,
            Self::DecryptionFailure => 900008,
            Self::FrameParseFailure(_) => 900009,
            Self::IdentityMismatch => 900010,
        }
    }

    /// True for rejections that may indicate a forged or misrouted message.
    pub fn is_security_rejection(&self) -> bool {
        matches!(self, Self::SignatureMismatch | Self::IdentityMismatch)
    }
}

/// Failures while loading credentials from the environment or a file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
