#![no_main]

use callback_crypto::CallbackCrypto;
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static CRYPTO: Lazy<CallbackCrypto> = Lazy::new(|| {
    CallbackCrypto::new("fuzz", "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8", "corpA")
        .expect("fixed key is valid")
});

fuzz_target!(|data: &[u8]| {
    // Raw ciphertext bytes, skipping base64
    let _ = callback_crypto::raw::decode(data, CRYPTO.credentials());

    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    // Bypass the signature so the decrypt and frame paths see the input
    let sig = CRYPTO.signature("1", "n", text);
    let _ = CRYPTO.open_parts(&sig, "1", "n", text);
});
