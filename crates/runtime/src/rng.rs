//! Seeded random source backed by `rand`.
use ironwood_core::CombatRng;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// [`CombatRng`] over a seedable standard generator.
///
/// The same seed replays the same patrol walks and drop rolls.
#[derive(Clone, Debug)]
pub struct StdCombatRng {
    inner: StdRng,
}

impl StdCombatRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl CombatRng for StdCombatRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}
