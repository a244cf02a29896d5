//! Plaintext frame (encrypted end to end)
//!
//! Format:
//!   random[16] || payload_len[4, u32 BE] || payload[payload_len] || owner_key || pad[1..=32]
//!
//! pad is block-32 PKCS#7 style, see [`crate::padding`].

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

pub const AES_KEY_BYTES: usize = 32;
pub const IV_BYTES: usize = 16;
pub const ENCODED_AES_KEY_CHARS: usize = 43;

/// Random prefix generated per frame.
pub const RANDOM_BYTES: usize = 16;

/// Big-endian payload length.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// random + payload_len
pub const HEADER_BYTES: usize = RANDOM_BYTES + LENGTH_PREFIX_BYTES; // 20

/// Padding block size. Not the AES block size.
pub const PAD_BLOCK_BYTES: usize = 32;

/// Borrowed view of a parsed (already unpadded) frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameComponents<'a> {
    pub random: &'a [u8; RANDOM_BYTES],
    pub payload: &'a [u8],
    pub owner_key: &'a [u8],
}

/// Assemble an unpadded frame.
pub fn encode_frame(
    random: &[u8; RANDOM_BYTES],
    payload: &[u8],
    owner_key: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let payload_len =
        u32::try_from(payload.len()).map_err(|_| CryptoError::EncryptionFailure)?;

    let mut out = Vec::with_capacity(
        HEADER_BYTES + payload.len() + owner_key.len() + PAD_BLOCK_BYTES,
    );
    out.extend_from_slice(random);
    out.extend_from_slice(&payload_len.to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(owner_key);
    Ok(out)
}

/// Split an unpadded frame. The owner key is returned as-is; comparing it
/// to the expected identity is the caller's job.
pub fn decode_frame(data: &[u8]) -> Result<FrameComponents<'_>, CryptoError> {
    if data.len() < HEADER_BYTES {
        return Err(CryptoError::FrameParseFailure("frame shorter than header"));
    }

    let random: &[u8; RANDOM_BYTES] = data[..RANDOM_BYTES]
        .try_into()
        .map_err(|_| CryptoError::FrameParseFailure("frame shorter than header"))?;

    let len_bytes: [u8; LENGTH_PREFIX_BYTES] = data[RANDOM_BYTES..HEADER_BYTES]
        .try_into()
        .map_err(|_| CryptoError::FrameParseFailure("frame shorter than header"))?;
    let payload_len = u32::from_be_bytes(len_bytes) as usize;

    let payload_end = HEADER_BYTES
        .checked_add(payload_len)
        .filter(|end| *end <= data.len())
        .ok_or(CryptoError::FrameParseFailure("payload length exceeds frame"))?;

    Ok(FrameComponents {
        random,
        payload: &data[HEADER_BYTES..payload_end],
        owner_key: &data[payload_end..],
    })
}
