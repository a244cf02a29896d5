#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(unpadded) = callback_crypto::raw::unpad(data) {
        let _ = callback_crypto::wire::decode_frame(unpadded);
    }
});
