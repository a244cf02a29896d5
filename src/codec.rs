//! Envelope codec: frame + pad + AES-256-CBC, and the reverse.

use zeroize::Zeroizing;

use crate::credentials::Credentials;
use crate::error::CryptoError;
use crate::wire::RANDOM_BYTES;
use crate::{cipher, padding, wire};

/// Frame, pad and encrypt `plaintext`. Returns raw ciphertext bytes.
pub fn encode(
    random: &[u8; RANDOM_BYTES],
    plaintext: &str,
    creds: &Credentials,
) -> Result<Vec<u8>, CryptoError> {
    let mut frame = Zeroizing::new(wire::encode_frame(
        random,
        plaintext.as_bytes(),
        creds.owner_key().as_bytes(),
    )?);
    padding::pad(&mut frame);
    cipher::cbc_encrypt(creds.key(), &frame)
}

/// Decrypt, unpad and parse a frame, checking the embedded owner key.
pub fn decode(ciphertext: &[u8], creds: &Credentials) -> Result<String, CryptoError> {
    let decrypted = Zeroizing::new(cipher::cbc_decrypt(creds.key(), ciphertext)?);
    let unpadded = padding::unpad(&decrypted)?;
    let parts = wire::decode_frame(unpadded)?;

    if parts.owner_key != creds.owner_key().as_bytes() {
        return Err(CryptoError::IdentityMismatch);
    }

    let payload = core::str::from_utf8(parts.payload)
        .map_err(|_| CryptoError::FrameParseFailure("payload is not utf-8"))?;
    Ok(payload.to_owned())
}
