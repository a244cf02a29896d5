//! Block-32 padding.
//!
//! PKCS#7 rules applied to a 32-byte block: append `n` bytes of value `n`,
//! `n = 32 - len % 32`, so an aligned input gets a full block of 32s. The
//! platform pads to 32 even though AES blocks are 16 bytes; both sides must
//! agree on this.

use crate::error::CryptoError;
use crate::wire::PAD_BLOCK_BYTES;

/// Number of pad bytes needed for a buffer of `len` bytes (always 1..=32).
#[inline]
pub fn pad_len(len: usize) -> usize {
    PAD_BLOCK_BYTES - (len % PAD_BLOCK_BYTES)
}

/// Append padding in place.
pub fn pad(buf: &mut Vec<u8>) {
    let n = pad_len(buf.len());
    // n <= 32, fits in a byte
    buf.resize(buf.len() + n, n as u8);
}

/// Strip padding, returning the unpadded prefix.
///
/// Only the claimed length is bounds-checked; the pad bytes themselves are
/// not compared, matching how the platform strips padding.
pub fn unpad(buf: &[u8]) -> Result<&[u8], CryptoError> {
    let last = *buf
        .last()
        .ok_or(CryptoError::FrameParseFailure("empty buffer"))?;
    let n = last as usize;
    if n == 0 || n > PAD_BLOCK_BYTES || n > buf.len() {
        return Err(CryptoError::FrameParseFailure("invalid padding"));
    }
    Ok(&buf[..buf.len() - n])
}
