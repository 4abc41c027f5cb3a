//! Environment abstraction for deterministic testing.
//!
//! Decouples payload encryption from the process-wide random source. The
//! production implementation reads OS entropy; test harnesses substitute a
//! seeded generator to get reproducible nonces.

/// Source of randomness for nonce generation.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - Concurrent callers never observe repeated or correlated output
/// - Methods are infallible except in exceptional circumstances (e.g., OS
///   entropy exhaustion, incorrect simulation setup)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    /// - Uses cryptographically secure RNG
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random 24-byte `XChaCha20` nonce.
    fn random_nonce(&self) -> [u8; 24] {
        let mut nonce = [0u8; 24];
        self.random_bytes(&mut nonce);
        nonce
    }
}

/// Production environment backed by the OS cryptographic RNG.
///
/// Uses getrandom, which provides OS-level cryptographic randomness (e.g.,
/// /dev/urandom on Linux, `BCryptGenRandom` on Windows) and is safe to call
/// from any number of threads.
///
/// # Panics
///
/// Panics if the OS RNG fails. Encrypting with a predictable nonce would
/// reuse keystream, so there is no safe fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - nonces cannot be generated");
    }
}
