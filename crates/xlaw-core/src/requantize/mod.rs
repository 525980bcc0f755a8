//! Bit-depth requantization
//!
//! Converts linear samples between bit depths. Upscaling is an exact left
//! shift. Downscaling adds triangular dither, applies first-order
//! error-feedback noise shaping, rounds to the target grid and saturates.
//!
//! The feedback state is either threaded explicitly through
//! [`requantize_sample`] or owned by a [`Requantizer`], which processes a
//! sequence strictly in order.

pub mod dither;

pub use dither::{DitherSource, NoDither, TpdfDither};

use crate::error::{Result, XlawError};
use crate::types::BitDepth;
use crate::utils::validation::{validate_non_empty, validate_samples};
use tracing::{debug, trace};

/// Gain applied to the previous sample's quantization error
///
/// The output satisfies `q·step = x + d − e[n] + c·e[n−1]`, so the mean
/// output error is `(c − 1)·mean(e)` rather than zero and stays within
/// `(1 − c)·step / 2` plus the dither peak.
pub const NOISE_SHAPING_COEFFICIENT: f64 = -1.5;

/// Behaviour when input and target depths are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EqualDepthPolicy {
    /// Return samples unchanged
    #[default]
    Passthrough,
    /// Fail with [`XlawError::InvalidBitDepth`]
    Reject,
}

/// Requantizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequantizerConfig {
    /// Depth of incoming samples
    pub input: BitDepth,
    /// Depth of produced samples
    pub target: BitDepth,
    /// Equal-depth behaviour
    pub equal_depth: EqualDepthPolicy,
}

impl RequantizerConfig {
    /// Create a configuration with the default equal-depth policy
    pub fn new(input: BitDepth, target: BitDepth) -> Self {
        Self {
            input,
            target,
            equal_depth: EqualDepthPolicy::default(),
        }
    }

    /// Set the equal-depth policy
    pub fn with_equal_depth(mut self, policy: EqualDepthPolicy) -> Self {
        self.equal_depth = policy;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.input.ensure_implemented("requantization")?;
        self.target.ensure_implemented("requantization")?;
        if self.input == self.target && self.equal_depth == EqualDepthPolicy::Reject {
            return Err(XlawError::invalid_bit_depth(
                self.target.bits(),
                "input and target bit depths are equal",
            ));
        }
        Ok(())
    }

    fn direction(&self) -> Direction {
        let (input, target) = (self.input.bits(), self.target.bits());
        if target > input {
            Direction::Up(target - input)
        } else if target < input {
            Direction::Down(input - target)
        } else {
            Direction::Identity
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Identity,
    Up(u32),
    Down(u32),
}

/// One requantized sample and the error to feed into the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Requantized {
    /// Sample at the target depth
    pub sample: i32,
    /// Signed quantization error in input-depth units
    pub error: f64,
}

/// Feedback state carried between consecutive samples
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuantizationState {
    previous_error: f64,
}

impl QuantizationState {
    /// Fresh state at the start of a sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Error produced by the previous sample
    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }

    /// Record the error of the sample just processed
    pub fn update(&mut self, error: f64) {
        self.previous_error = error;
    }

    /// Return to the start-of-sequence state
    pub fn reset(&mut self) {
        self.previous_error = 0.0;
    }
}

/// Requantize a single sample
///
/// `previous_error` is the `error` of the preceding call in the same
/// sequence, or 0 for the first sample.
///
/// # Errors
///
/// Returns [`XlawError::Range`] when `sample` does not fit the input depth,
/// plus any configuration error from [`RequantizerConfig::validate`].
pub fn requantize_sample<D>(
    sample: i32,
    config: &RequantizerConfig,
    previous_error: f64,
    dither: &mut D,
) -> Result<Requantized>
where
    D: DitherSource + ?Sized,
{
    config.validate()?;
    config.input.check_sample(i64::from(sample))?;
    Ok(requantize_unchecked(sample, config, previous_error, dither))
}

fn requantize_unchecked<D>(
    sample: i32,
    config: &RequantizerConfig,
    previous_error: f64,
    dither: &mut D,
) -> Requantized
where
    D: DitherSource + ?Sized,
{
    match config.direction() {
        Direction::Identity => Requantized { sample, error: 0.0 },
        Direction::Up(shift) => Requantized {
            sample: sample << shift,
            error: 0.0,
        },
        Direction::Down(shift) => {
            let divisor = (1u64 << shift) as f64;
            let shaped = f64::from(sample)
                + dither.next_dither()
                + previous_error * NOISE_SHAPING_COEFFICIENT;
            let rounded = (shaped / divisor).round();
            let error = shaped - rounded * divisor;

            // Saturate, never wrap
            let target = config.target;
            let clamped = rounded.clamp(target.min_value() as f64, target.max_value() as f64);
            Requantized {
                sample: clamped as i32,
                error,
            }
        }
    }
}

/// Stateful requantizer for a single sample sequence
///
/// Owns its dither source and feedback state, so it is `Send` when the
/// dither is, but never shared between threads.
#[derive(Debug)]
pub struct Requantizer<D: DitherSource = TpdfDither> {
    config: RequantizerConfig,
    state: QuantizationState,
    dither: D,
}

impl Requantizer<TpdfDither> {
    /// Create a requantizer with entropy-seeded triangular dither
    pub fn new(config: RequantizerConfig) -> Result<Self> {
        Self::with_dither(config, TpdfDither::from_entropy())
    }

    /// Create a requantizer with reproducible triangular dither
    pub fn with_seed(config: RequantizerConfig, seed: u64) -> Result<Self> {
        Self::with_dither(config, TpdfDither::from_seed(seed))
    }
}

impl<D: DitherSource> Requantizer<D> {
    /// Create a requantizer with a caller-supplied dither source
    pub fn with_dither(config: RequantizerConfig, dither: D) -> Result<Self> {
        config.validate()?;
        debug!(
            "Created requantizer: {} -> {} ({:?})",
            config.input, config.target, config.equal_depth
        );
        Ok(Self {
            config,
            state: QuantizationState::new(),
            dither,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &RequantizerConfig {
        &self.config
    }

    /// Error carried into the next sample
    pub fn previous_error(&self) -> f64 {
        self.state.previous_error()
    }

    /// Requantize the next sample of the sequence
    pub fn process_sample(&mut self, sample: i32) -> Result<i32> {
        self.config.input.check_sample(i64::from(sample))?;
        Ok(self.step(sample))
    }

    /// Requantize a whole sequence in order
    ///
    /// The input is validated in full before any sample is processed, so a
    /// failing call leaves the feedback state untouched.
    pub fn process(&mut self, samples: &[i32]) -> Result<Vec<i32>> {
        validate_non_empty(samples, "requantize")?;
        validate_samples(samples, self.config.input, "requantize")?;
        Ok(samples.iter().map(|&sample| self.step(sample)).collect())
    }

    /// Start a new sequence
    pub fn reset(&mut self) {
        trace!("Resetting requantizer state");
        self.state.reset();
    }

    fn step(&mut self, sample: i32) -> i32 {
        let out = requantize_unchecked(
            sample,
            &self.config,
            self.state.previous_error(),
            &mut self.dither,
        );
        self.state.update(out.error);
        out.sample
    }
}
