//! # callback-crypto
//!
//! Signed, encrypted envelopes for platform event callbacks.
//!
//! ## Quick Start
//!
//! ```rust
//! use callback_crypto::CallbackCrypto;
//!
//! let crypto = CallbackCrypto::new(
//!     "token",
//!     "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8",
//!     "corpA",
//! )
//! .unwrap();
//!
//! let envelope = crypto.seal("hello", 1630000000, "abc123").unwrap();
//! let plaintext = crypto.open(&envelope).unwrap();
//!
//! assert_eq!(plaintext, "hello");
//! ```
//!
//! ## Protocol
//!
//! - **Frame**: `random[16] || len[4, BE] || payload || owner_key`, padded to 32
//! - **Cipher**: AES-256-CBC, IV = first 16 key bytes
//! - **Signature**: SHA-1 hex over the sorted `{token, timestamp, nonce, encrypt}`
//!
//! ## What's NOT Provided
//!
//! - HTTP handling of the callback request
//! - Replay caches or timestamp windows
//! - Other cipher modes or framings

#![deny(unsafe_code)]

mod cipher;
mod codec;
mod credentials;
mod envelope;
mod error;
mod padding;

pub mod config;
pub mod signature;

// Frame layout is public for tests and fuzzing but not stable API
#[doc(hidden)]
pub mod wire;

pub use config::Config;
pub use credentials::{AesKey, Credentials};
pub use envelope::{CallbackCrypto, Envelope, SealRequest, SUCCESS_REPLY};
pub use error::{ConfigError, CryptoError};

/// Low-level codec entry points with a caller-chosen random prefix.
///
/// For known-answer tests and fuzzing; production code goes through
/// [`CallbackCrypto`].
#[doc(hidden)]
pub mod raw {
    pub use crate::codec::{decode, encode};
    pub use crate::padding::{pad, pad_len, unpad};
}
