//! Fuzz target for payload decoding and decryption
//!
//! This fuzzer feeds arbitrary text and raw frames to the decoder with:
//! - Invalid base64 and bad padding
//! - Unknown version bytes
//! - Frames shorter than the header
//! - Oversized inputs against a small limit
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nostrum_crypto::{EncryptedPayload, PayloadCodec, PayloadConfig, SystemEnv, decrypt_payload};

fuzz_target!(|data: &[u8]| {
    let key = [0x42u8; 32];
    let small = PayloadConfig { max_payload_size: 64, ..PayloadConfig::default() };

    for config in [PayloadConfig::default(), PayloadConfig::legacy(), small] {
        if let Ok(payload) = EncryptedPayload::decode(data, &config) {
            // Any accepted frame must re-encode to the same bytes
            assert_eq!(payload.encode(), data);
            let plaintext = decrypt_payload(&payload, &key);
            assert_eq!(plaintext.len(), payload.ciphertext.len());
        }

        if let Ok(text) = std::str::from_utf8(data) {
            let codec = PayloadCodec::with_config(SystemEnv::new(), config);
            let _ = codec.decrypt(text, &key);
        }
    }
});
