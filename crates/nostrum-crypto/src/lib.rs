//! Nostrum Cryptographic Primitives
//!
//! Key agreement and payload encryption for Nostrum events. Everything here
//! is a pure function of its inputs except nonce generation, which goes
//! through the [`Environment`] trait so tests can substitute a seeded source.
//!
//! # Key Flow
//!
//! ```text
//! local secret key + remote x-only public key
//!        │
//!        ▼
//! secp256k1 ECDH → x-coordinate → SHA-256 → SharedSecret (32 bytes)
//!        │
//!        ▼
//! XChaCha20 keystream (fresh 24-byte nonce) → base64(0x01 || nonce || ct)
//! ```
//!
//! # Security
//!
//! Confidentiality only:
//! - Payloads carry no MAC; tampering is not detected here
//! - Nonces are random per call, never derived from content
//! - Derived secrets are zeroized on drop
//!
//! Interoperability:
//! - x-only public keys are lifted with an even y-coordinate
//! - Only payload version 1 is produced or accepted

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod ecdh;
pub mod env;
pub mod error;
pub mod payload;

pub use ecdh::{KEY_SIZE, SharedSecret, compute_shared_secret, x_only_public_key};
pub use env::{Environment, SystemEnv};
pub use error::{CryptoError, Result};
pub use payload::{
    EncryptedPayload, HEADER_SIZE, MAX_PAYLOAD_SIZE, NONCE_SIZE, PayloadCodec, PayloadConfig,
    VERSION, decrypt, decrypt_payload, encrypt, encrypt_with_nonce,
};
