//! Nostrum event protocol types.
//!
//! The [`Event`] record, its canonical byte serialization and the
//! content-addressed identifier derived from it. Everything here is pure and
//! infallible; parsing events from JSON and checking signatures are left to
//! the caller.
//!
//! # Identifier binding
//!
//! ```text
//! Event { pubkey, created_at, kind, tags, content }
//!        │
//!        ▼
//! canonical::serialize → [0,"pubkey",created_at,kind,tags,"content"]
//!        │
//!        ▼
//! Keccak-256(prefix || len || bytes) → id (64 lowercase hex)
//! ```
//!
//! `id` and `sig` never feed the digest, so an event can be identified
//! before it is signed and the id never depends on itself.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod canonical;
pub mod event;
pub mod id;

pub use canonical::{escape_string, serialize, serialize_into};
pub use event::{Event, Tag, Timestamp};
pub use id::{ID_HEX_LEN, SIGNED_MESSAGE_PREFIX, compute_id, id_digest, verify_id};
