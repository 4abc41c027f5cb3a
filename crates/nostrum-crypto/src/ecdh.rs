//! secp256k1 key agreement for payload encryption keys
//!
//! # x-only public keys
//!
//! Peers publish only the 32-byte x-coordinate of their public key. To get a
//! curve point back, the x-coordinate is read as a SEC1 compressed point with
//! an even y-coordinate (`0x02 || x`). Both peers MUST use this convention.
//! It does not break symmetry: negating a point leaves the x-coordinate of the
//! shared point unchanged, so the derived key is the same whichever y the
//! sender actually had.

use k256::{
    PublicKey, SecretKey,
    elliptic_curve::{sec1::ToEncodedPoint, subtle::ConstantTimeEq},
};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

/// Size of a secret key, x-only public key and derived secret.
pub const KEY_SIZE: usize = 32;

/// SEC1 tag for a compressed point with even y.
const EVEN_Y_TAG: u8 = 0x02;

/// Symmetric key derived from an ECDH exchange (32 bytes).
///
/// Zeroized on drop. The `Debug` output never contains key material, and
/// equality runs in constant time.
#[derive(Clone)]
pub struct SharedSecret([u8; KEY_SIZE]);

impl SharedSecret {
    /// Wraps existing 32-byte key material.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw 32-byte key for the payload cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for SharedSecret {}

// Implement Drop to zeroize key material
impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Compute the shared encryption key between a remote public key and a local
/// secret key.
///
/// `public_key_hex` is the remote peer's 64-char x-only public key and
/// `secret_key_hex` the local 64-char secret key. The result is
/// `SHA-256(x(sk * P))` where `P` is the remote point with even y.
///
/// Symmetric: `compute_shared_secret(pub_b, sk_a)` equals
/// `compute_shared_secret(pub_a, sk_b)`.
///
/// # Errors
///
/// - `Decode`: either input is not hex or does not decode to 32 bytes
/// - `InvalidKey`: the secret is zero or not below the curve order, or the
///   x-coordinate has no point on the curve
pub fn compute_shared_secret(public_key_hex: &str, secret_key_hex: &str) -> Result<SharedSecret> {
    let secret_key = parse_secret_key(secret_key_hex)?;
    let public_key = parse_x_only_public_key(public_key_hex)?;

    let shared = k256::ecdh::diffie_hellman(secret_key.to_nonzero_scalar(), public_key.as_affine());
    let digest: [u8; KEY_SIZE] = Sha256::digest(shared.raw_secret_bytes()).into();

    tracing::trace!("derived shared secret");

    Ok(SharedSecret(digest))
}

/// Derive the 64-char x-only public key for a secret key.
///
/// # Errors
///
/// Same validation as the secret key argument of [`compute_shared_secret`].
pub fn x_only_public_key(secret_key_hex: &str) -> Result<String> {
    let secret_key = parse_secret_key(secret_key_hex)?;
    let point = secret_key.public_key().to_encoded_point(true);

    // Compressed encoding is tag || x
    Ok(hex::encode(&point.as_bytes()[1..]))
}

fn parse_secret_key(secret_key_hex: &str) -> Result<SecretKey> {
    let mut bytes = decode_key("secret key", secret_key_hex)?;
    let key = SecretKey::from_slice(&bytes).map_err(|_| CryptoError::InvalidKey {
        field: "secret key",
        reason: "scalar is zero or not below the curve order",
    });
    bytes.zeroize();
    key
}

fn parse_x_only_public_key(public_key_hex: &str) -> Result<PublicKey> {
    let x = decode_key("public key", public_key_hex)?;

    let mut compressed = [0u8; KEY_SIZE + 1];
    compressed[0] = EVEN_Y_TAG;
    compressed[1..].copy_from_slice(&x);

    PublicKey::from_sec1_bytes(&compressed).map_err(|_| CryptoError::InvalidKey {
        field: "public key",
        reason: "x-coordinate is not on the curve",
    })
}

fn decode_key(field: &'static str, input: &str) -> Result<[u8; KEY_SIZE]> {
    let mut bytes = [0u8; KEY_SIZE];
    hex::decode_to_slice(input, &mut bytes)
        .map_err(|e| CryptoError::Decode { field, reason: e.to_string() })?;
    Ok(bytes)
}
