//! Random number generation for the draw engine.
//!
//! RULE: All randomness flows through the single CaseRng owned by the store.
//! Draw functions take `&mut CaseRng` and never reach for a platform RNG,
//! so a seeded store replays the exact same draw sequence.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The engine's random source. Not cryptographic — "uniform enough for a
/// simulator" is the whole contract.
pub struct CaseRng {
    inner: Pcg64Mcg,
}

impl CaseRng {
    /// Seed from OS entropy. Production stores use this.
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// Seed deterministically. Tests and replay tooling use this.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in [min, max). Callers guarantee min < max.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}
