//! Versioned payload encryption using unauthenticated `XChaCha20`
//!
//! Wire format, base64-encoded with the standard alphabet and padding:
//!
//! ```text
//! +---------+-------------+----------------------+
//! | version | nonce       | ciphertext           |
//! | 1 byte  | 24 bytes    | len(plaintext) bytes |
//! +---------+-------------+----------------------+
//! ```
//!
//! # Security
//!
//! There is no authentication tag. A modified ciphertext decrypts to
//! different plaintext without any error. Integrity must come from elsewhere
//! (e.g. a signature over the enclosing event).
//!
//! Nonces are never derived from message content or counters: every
//! [`PayloadCodec::encrypt`] draws 24 fresh bytes from its [`Environment`].

use base64::{Engine, engine::general_purpose::STANDARD};
use chacha20::{
    XChaCha20,
    cipher::{KeyIvInit, StreamCipher},
};

use crate::{
    env::{Environment, SystemEnv},
    error::{CryptoError, Result},
};

/// The only payload version this crate produces or accepts
pub const VERSION: u8 = 1;

/// Size of the `XChaCha20` nonce (24 bytes)
pub const NONCE_SIZE: usize = 24;

/// Version byte plus nonce (25 bytes)
pub const HEADER_SIZE: usize = 1 + NONCE_SIZE;

/// Default upper bound on a decoded frame (16 MB)
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Decoding policy for incoming payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadConfig {
    /// Accept a bare 25-byte frame carrying an empty plaintext.
    ///
    /// When false, a frame must carry at least one ciphertext byte.
    pub accept_empty: bool,

    /// Largest decoded frame accepted, in bytes.
    pub max_payload_size: usize,
}

impl PayloadConfig {
    /// Strict policy that rejects empty plaintexts, for peers that treat a
    /// 25-byte frame as malformed.
    pub fn legacy() -> Self {
        Self { accept_empty: false, ..Self::default() }
    }

    /// Smallest frame accepted under this policy.
    pub fn min_frame_size(&self) -> usize {
        if self.accept_empty { HEADER_SIZE } else { HEADER_SIZE + 1 }
    }
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self { accept_empty: true, max_payload_size: MAX_PAYLOAD_SIZE }
    }
}

/// A decoded payload frame.
///
/// Holds the nonce and ciphertext separately; the version byte is implied
/// ([`VERSION`]) since no other version can be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// The 24-byte `XChaCha20` nonce
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext, same length as the plaintext
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Plaintext length (equal to the ciphertext length for a stream cipher).
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len()
    }

    /// Encode into `version || nonce || ciphertext`.
    pub fn encode(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(HEADER_SIZE + self.ciphertext.len());
        frame.push(VERSION);
        frame.extend_from_slice(&self.nonce);
        frame.extend_from_slice(&self.ciphertext);
        frame
    }

    /// Decode a raw frame.
    ///
    /// # Errors
    ///
    /// - `PayloadTooLarge` if the frame exceeds `config.max_payload_size`
    /// - `TruncatedPayload` if the frame is empty or shorter than
    ///   `config.min_frame_size()`
    /// - `UnsupportedVersion` if the first byte is not [`VERSION`]
    pub fn decode(frame: &[u8], config: &PayloadConfig) -> Result<Self> {
        if frame.len() > config.max_payload_size {
            return Err(CryptoError::PayloadTooLarge {
                size: frame.len(),
                max: config.max_payload_size,
            });
        }

        let min = config.min_frame_size();
        let Some(&version) = frame.first() else {
            return Err(CryptoError::TruncatedPayload { size: 0, min });
        };

        if version != VERSION {
            tracing::debug!(version, "rejecting payload with unknown version");
            return Err(CryptoError::UnsupportedVersion { version });
        }

        if frame.len() < min {
            tracing::debug!(size = frame.len(), min, "rejecting truncated payload");
            return Err(CryptoError::TruncatedPayload { size: frame.len(), min });
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&frame[1..HEADER_SIZE]);

        Ok(Self { nonce, ciphertext: frame[HEADER_SIZE..].to_vec() })
    }

    /// Encode as standard padded base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.encode())
    }

    /// Decode from standard padded base64.
    ///
    /// # Errors
    ///
    /// - `PayloadTooLarge` if the encoded text alone implies a frame above
    ///   the limit (checked before decoding)
    /// - `Format` if the text is not valid standard base64
    /// - Any error from [`EncryptedPayload::decode`]
    pub fn from_base64(payload: &str, config: &PayloadConfig) -> Result<Self> {
        let max_encoded = config.max_payload_size.div_ceil(3).saturating_mul(4);
        if payload.len() > max_encoded {
            return Err(CryptoError::PayloadTooLarge {
                size: payload.len() / 4 * 3,
                max: config.max_payload_size,
            });
        }

        let frame = STANDARD.decode(payload).map_err(|e| {
            tracing::debug!(error = %e, "rejecting payload with invalid base64");
            CryptoError::Format { reason: e.to_string() }
        })?;

        Self::decode(&frame, config)
    }
}

/// Encrypt with a caller-provided nonce.
///
/// Pure function: the same (plaintext, key, nonce) always gives the same
/// payload. The caller MUST NOT reuse a nonce under the same key; XOR of two
/// such ciphertexts reveals the XOR of the plaintexts.
pub fn encrypt_with_nonce(
    plaintext: &[u8],
    key: &[u8; 32],
    nonce: [u8; NONCE_SIZE],
) -> EncryptedPayload {
    let mut ciphertext = plaintext.to_vec();
    apply_keystream(key, &nonce, &mut ciphertext);
    EncryptedPayload { nonce, ciphertext }
}

/// Recover plaintext bytes from a decoded payload.
///
/// Never fails: without a tag, a wrong key or modified ciphertext simply
/// yields different bytes.
pub fn decrypt_payload(payload: &EncryptedPayload, key: &[u8; 32]) -> Vec<u8> {
    let mut plaintext = payload.ciphertext.clone();
    apply_keystream(key, &payload.nonce, &mut plaintext);
    plaintext
}

fn apply_keystream(key: &[u8; 32], nonce: &[u8; NONCE_SIZE], buffer: &mut [u8]) {
    let mut cipher = XChaCha20::new(key.into(), nonce.into());
    cipher.apply_keystream(buffer);
}

/// Payload encryption bound to a nonce source and a decoding policy.
#[derive(Debug, Clone)]
pub struct PayloadCodec<E: Environment = SystemEnv> {
    env: E,
    config: PayloadConfig,
}

impl PayloadCodec<SystemEnv> {
    /// Codec using OS randomness and the default policy.
    pub fn new() -> Self {
        Self::with_env(SystemEnv::new())
    }
}

impl Default for PayloadCodec<SystemEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> PayloadCodec<E> {
    /// Codec drawing nonces from `env`, with the default policy.
    pub fn with_env(env: E) -> Self {
        Self::with_config(env, PayloadConfig::default())
    }

    /// Codec with an explicit environment and policy.
    pub fn with_config(env: E, config: PayloadConfig) -> Self {
        Self { env, config }
    }

    /// Active decoding policy.
    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    /// Encrypt raw bytes under a fresh nonce, returning the base64 payload.
    pub fn encrypt_bytes(&self, plaintext: &[u8], key: &[u8; 32]) -> String {
        let nonce = self.env.random_nonce();
        encrypt_with_nonce(plaintext, key, nonce).to_base64()
    }

    /// Encrypt text under a fresh nonce, returning the base64 payload.
    pub fn encrypt(&self, plaintext: &str, key: &[u8; 32]) -> String {
        self.encrypt_bytes(plaintext.as_bytes(), key)
    }

    /// Decrypt a base64 payload to raw bytes.
    ///
    /// # Errors
    ///
    /// See [`EncryptedPayload::from_base64`].
    pub fn decrypt_bytes(&self, payload: &str, key: &[u8; 32]) -> Result<Vec<u8>> {
        let decoded = EncryptedPayload::from_base64(payload, &self.config)?;
        Ok(decrypt_payload(&decoded, key))
    }

    /// Decrypt a base64 payload to text.
    ///
    /// Byte sequences that are not UTF-8 become U+FFFD. A wrong key or a
    /// modified ciphertext therefore still yields text, never an error.
    ///
    /// # Errors
    ///
    /// See [`EncryptedPayload::from_base64`].
    pub fn decrypt(&self, payload: &str, key: &[u8; 32]) -> Result<String> {
        let plaintext = self.decrypt_bytes(payload, key)?;
        Ok(String::from_utf8_lossy(&plaintext).into_owned())
    }
}

/// Encrypt `plaintext` with OS randomness.
///
/// Returns `base64(0x01 || nonce || ciphertext)`.
pub fn encrypt(plaintext: &str, key: &[u8; 32]) -> String {
    PayloadCodec::new().encrypt(plaintext, key)
}

/// Decrypt a payload produced by [`encrypt`] using the default policy.
///
/// # Errors
///
/// See [`PayloadCodec::decrypt`].
pub fn decrypt(payload: &str, key: &[u8; 32]) -> Result<String> {
    PayloadCodec::new().decrypt(payload, key)
}
