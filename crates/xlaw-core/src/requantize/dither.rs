//! Dither sources for the requantizer

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of additive dither values, in units of input LSBs
pub trait DitherSource {
    /// Next dither value
    fn next_dither(&mut self) -> f64;
}

impl<D: DitherSource + ?Sized> DitherSource for &mut D {
    fn next_dither(&mut self) -> f64 {
        (**self).next_dither()
    }
}

/// Triangular-PDF dither
///
/// Each value is the mean of two independent uniform draws in `[-1, 1]`,
/// giving a triangular distribution over the same interval.
#[derive(Debug, Clone)]
pub struct TpdfDither<R: Rng = SmallRng> {
    rng: R,
}

impl TpdfDither<SmallRng> {
    /// Deterministic dither from a seed
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Dither seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> TpdfDither<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DitherSource for TpdfDither<R> {
    fn next_dither(&mut self) -> f64 {
        let a: f64 = self.rng.gen_range(-1.0..=1.0);
        let b: f64 = self.rng.gen_range(-1.0..=1.0);
        (a + b) / 2.0
    }
}

/// Zero dither (plain error-feedback rounding)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDither;

impl DitherSource for NoDither {
    fn next_dither(&mut self) -> f64 {
        0.0
    }
}
