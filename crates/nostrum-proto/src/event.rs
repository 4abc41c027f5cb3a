//! Event data model.

use serde::{Deserialize, Serialize};

/// Creation time in whole seconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Timestamp from seconds since the Unix epoch.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Seconds since the Unix epoch.
    pub const fn as_secs(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

/// One tag: an ordered list of strings, conventionally `[key, value, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Vec<String>);

impl Tag {
    /// Build a tag from its items, in order.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    /// First item (the tag name), if any.
    pub fn key(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Second item, if any.
    pub fn value(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// All items in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the tag has no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Tag {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

/// A signed event record.
///
/// `id` and `sig` are carried verbatim and never interpreted here, except
/// that [`crate::verify_id`] compares `id` against the digest of the other
/// five fields. Signature checking belongs to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Lowercase hex Keccak-256 identifier (64 chars)
    pub id: String,
    /// Author's x-only public key, hex (64 chars)
    pub pubkey: String,
    /// Creation time
    pub created_at: Timestamp,
    /// Event kind
    pub kind: i64,
    /// Ordered tags
    pub tags: Vec<Tag>,
    /// Free-text content
    pub content: String,
    /// Signature over the id, hex
    pub sig: String,
}

impl Event {
    /// Unsigned event with an empty `id` and `sig`.
    pub fn new(
        pubkey: impl Into<String>,
        created_at: Timestamp,
        kind: i64,
        tags: Vec<Tag>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            pubkey: pubkey.into(),
            created_at,
            kind,
            tags,
            content: content.into(),
            sig: String::new(),
        }
    }

    /// Canonical bytes the identifier is computed over.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        crate::canonical::serialize(self)
    }

    /// Identifier implied by the current fields, as lowercase hex.
    pub fn compute_id(&self) -> String {
        crate::id::compute_id(self)
    }

    /// True if `self.id` matches the current fields.
    pub fn check_id(&self) -> bool {
        crate::id::verify_id(self)
    }

    /// Overwrite `self.id` with the identifier implied by the current fields.
    pub fn fill_id(&mut self) {
        self.id = self.compute_id();
    }
}
