//! Content-addressed event identifiers.
//!
//! The identifier is Keccak-256 over the canonical bytes wrapped in a
//! signed-message header:
//!
//! ```text
//! "\x19Ethereum Signed Message:\n" || decimal(len(canonical)) || canonical
//! ```
//!
//! The prefix and the decimal length (no separator before the canonical
//! bytes) are part of the wire contract. Changing either changes every id.

use sha3::{Digest, Keccak256};

use crate::{canonical, event::Event};

/// Header prepended to the canonical bytes before hashing
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Length of a hex identifier (32-byte digest)
pub const ID_HEX_LEN: usize = 64;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Raw 32-byte identifier digest of an event.
pub fn id_digest(event: &Event) -> [u8; 32] {
    let message = canonical::serialize(event);

    Keccak256::new()
        .chain_update(SIGNED_MESSAGE_PREFIX)
        .chain_update(message.len().to_string())
        .chain_update(&message)
        .finalize()
        .into()
}

/// Identifier of an event as 64 lowercase hex characters.
pub fn compute_id(event: &Event) -> String {
    hex::encode(id_digest(event))
}

/// True if `event.id` is the identifier of the event's own fields.
///
/// Compares the digest against `event.id` one hex digit at a time instead of
/// encoding the digest. Only lowercase hex of exactly 64 characters can
/// match.
pub fn verify_id(event: &Event) -> bool {
    let id = event.id.as_bytes();
    if id.len() != ID_HEX_LEN {
        tracing::trace!(len = id.len(), "event id has wrong length");
        return false;
    }

    let digest = id_digest(event);
    for (i, byte) in digest.iter().enumerate() {
        if HEX_DIGITS[(byte >> 4) as usize] != id[i * 2]
            || HEX_DIGITS[(byte & 0x0f) as usize] != id[i * 2 + 1]
        {
            tracing::trace!(id = %event.id, "event id does not match content");
            return false;
        }
    }

    true
}
