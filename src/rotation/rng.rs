//! Random streams for the allocator.
//!
//! Two sources:
//! - **Seeded**: mulberry32 seeded with a 32-bit FNV-1a hash of the date
//!   string. A pure function of the date, so the same date always yields
//!   the same stream and therefore the same schedule.
//! - **Entropy**: OS-seeded `StdRng`, fresh per run.
//!
//! Both produce uniform `f64` in `[0, 1)` via [`RotationRng::next_f64`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;
const MULBERRY_INCREMENT: u32 = 0x6d2b_79f5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// 32-bit FNV-1a hash over the UTF-16 code units of `input`.
pub fn hash_seed(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Mulberry32: a 32-bit xorshift-multiply generator.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seeds from a date string (or any string).
    pub fn from_date(date: &str) -> Self {
        Self::new(hash_seed(date))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }
}

/// The random stream driving one generation run.
#[derive(Debug, Clone)]
pub enum RotationRng {
    /// Reproducible stream derived from the date.
    Seeded(Mulberry32),
    /// Non-reproducible stream.
    Entropy(StdRng),
}

impl RotationRng {
    /// Date-seeded stream.
    pub fn seeded(date: &str) -> Self {
        RotationRng::Seeded(Mulberry32::from_date(date))
    }

    /// OS-seeded stream.
    pub fn entropy() -> Self {
        RotationRng::Entropy(StdRng::from_os_rng())
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        match self {
            RotationRng::Seeded(m) => m.next_f64(),
            RotationRng::Entropy(r) => r.random::<f64>(),
        }
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
