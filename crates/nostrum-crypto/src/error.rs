//! Error types for key agreement and payload operations

use thiserror::Error;

/// Errors from shared-secret derivation and payload encryption.
///
/// Every variant describes malformed or out-of-range caller input. None of
/// them is transient: retrying with the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Hex input was malformed or did not decode to the expected length
    #[error("invalid hex for {field}: {reason}")]
    Decode {
        /// Which input failed to decode
        field: &'static str,
        /// Decoder error message
        reason: String,
    },

    /// Key bytes decoded but are not a usable secp256k1 key
    #[error("invalid {field}: {reason}")]
    InvalidKey {
        /// Which key was rejected
        field: &'static str,
        /// Why the key was rejected
        reason: &'static str,
    },

    /// Payload is not valid standard base64
    #[error("invalid base64 payload: {reason}")]
    Format {
        /// Decoder error message
        reason: String,
    },

    /// Payload version byte is not one we understand
    #[error("unsupported payload version: {version}")]
    UnsupportedVersion {
        /// Version byte found at offset 0
        version: u8,
    },

    /// Payload is shorter than the minimum frame
    #[error("payload too short: {size} bytes, need at least {min}")]
    TruncatedPayload {
        /// Decoded frame size
        size: usize,
        /// Minimum accepted frame size
        min: usize,
    },

    /// Payload exceeds the configured size limit
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Frame size (or base64 length converted to decoded size)
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

impl CryptoError {
    /// Returns true if retrying the same call could succeed.
    ///
    /// Always false: every error is a deterministic validation failure of
    /// caller input.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Decode { .. }
            | Self::InvalidKey { .. }
            | Self::Format { .. }
            | Self::UnsupportedVersion { .. }
            | Self::TruncatedPayload { .. }
            | Self::PayloadTooLarge { .. } => false,
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
