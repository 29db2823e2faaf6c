//! The run-level random source.
//!
//! # Seeding
//!
//! Each simulation run owns exactly one `DemandRng`.  Production runs seed it
//! from system entropy, so two runs never share a stream; there is no
//! bit-reproducibility contract across runs.  Tests (and anyone who wants a
//! repeatable run) pass an explicit seed instead.
//!
//! Every consumer (headway sampling, schedule building, playback file choice,
//! routing) draws from the same handle, passed as `&mut DemandRng`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Single-threaded RNG shared by all demand-generation components of a run.
pub struct DemandRng(SmallRng);

impl DemandRng {
    /// Seed from system entropy (the default for simulation runs).
    pub fn from_entropy() -> Self {
        DemandRng(SmallRng::from_entropy())
    }

    /// Seed deterministically.
    pub fn seeded(seed: u64) -> Self {
        DemandRng(SmallRng::seed_from_u64(seed))
    }

    /// `Some(seed)` → [`seeded`](Self::seeded), `None` → [`from_entropy`](Self::from_entropy).
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` distribution
    /// types (`dist.sample(rng.inner())`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
