//! Callback signature
//!
//! signature = hex(SHA1(concat(sort([token, timestamp, nonce, encrypt]))))
//!
//! The four values are sorted byte-wise before concatenation, so only the
//! set of values matters, not which role each one plays.

use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

/// Compute the lowercase hex SHA-1 signature over the four values.
pub fn sign(token: &str, timestamp: &str, nonce: &str, encrypt: &str) -> String {
    let mut parts = [token, timestamp, nonce, encrypt];
    parts.sort_unstable();

    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Recompute the signature and compare against `claimed` in constant time.
///
/// Hex case is significant; the platform always sends lowercase.
pub fn verify(token: &str, timestamp: &str, nonce: &str, encrypt: &str, claimed: &str) -> bool {
    let expected = sign(token, timestamp, nonce, encrypt);
    expected.as_bytes().ct_eq(claimed.as_bytes()).into()
}
