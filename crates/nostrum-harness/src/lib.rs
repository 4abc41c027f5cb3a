//! Deterministic test harness for Nostrum.
//!
//! Provides [`SimEnv`], a seeded [`Environment`] so that nonce generation
//! is reproducible in tests. Never use it outside tests: a known seed means
//! known nonces.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod sim_env;

pub use sim_env::SimEnv;
