//! Block cipher: AES-256-CBC, IV = key[..16], no cipher-level padding.

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use getrandom::getrandom;

use crate::credentials::AesKey;
use crate::error::CryptoError;
use crate::wire::RANDOM_BYTES;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size in bytes.
pub const AES_BLOCK_BYTES: usize = 16;

/// Fresh random frame prefix. Used during encryption only.
pub fn random_prefix() -> Result<[u8; RANDOM_BYTES], CryptoError> {
    let mut r = [0u8; RANDOM_BYTES];
    getrandom(&mut r).map_err(|_| CryptoError::EncryptionFailure)?;
    Ok(r)
}

/// Encrypt an already padded buffer. Returns EncryptionFailure on failure.
pub fn cbc_encrypt(key: &AesKey, padded: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if padded.len() % AES_BLOCK_BYTES != 0 {
        return Err(CryptoError::EncryptionFailure);
    }
    let iv = key.iv();
    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
        .map_err(|_| CryptoError::EncryptionFailure)?;
    Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(padded))
}

/// Decrypt to the still-padded frame. Returns DecryptionFailure on failure.
pub fn cbc_decrypt(key: &AesKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_BYTES != 0 {
        return Err(CryptoError::DecryptionFailure);
    }
    let iv = key.iv();
    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), &iv)
        .map_err(|_| CryptoError::DecryptionFailure)?;
    cipher
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| CryptoError::DecryptionFailure)
}
