//! Seeded environment for reproducible nonces.

use std::sync::{Arc, Mutex, PoisonError};

use nostrum_crypto::Environment;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Environment backed by a seeded ChaCha RNG.
///
/// Clones share one generator, so two clones never hand out the same bytes.
/// The same seed always produces the same sequence of nonces across runs.
#[derive(Clone)]
pub struct SimEnv {
    rng: Arc<Mutex<ChaCha20Rng>>,
}

impl SimEnv {
    /// Create an environment from a 64-bit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
    }
}

impl Environment for SimEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        // A panicking test thread must not wedge the others
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.fill_bytes(buffer);
    }
}
