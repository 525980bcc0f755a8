//! Integrated loudness measurement
//!
//! Samples are normalized to full scale, K-weighted, split into 400 ms
//! blocks and reduced to block powers. Two gates then discard silent and
//! relatively quiet blocks before the surviving powers are averaged.
//!
//! ```
//! use xlaw_core::loudness::{LoudnessConfig, LoudnessMeter};
//! use xlaw_core::types::{BitDepth, SampleRate};
//!
//! let meter = LoudnessMeter::new(LoudnessConfig::new(BitDepth::Bits16, SampleRate::Rate48000))?;
//! let silence = vec![0; 48_000];
//! assert_eq!(meter.integrated_loudness(&silence)?, f64::NEG_INFINITY);
//! # Ok::<(), xlaw_core::XlawError>(())
//! ```

pub mod filter;

pub use filter::KWeightingFilter;

use crate::codecs::map_samples;
use crate::error::Result;
use crate::types::{BitDepth, SampleRate};
use crate::utils::validation::{validate_block, validate_non_empty, validate_sample_rate};
use rayon::prelude::*;
use tracing::debug;

/// Blocks at or below this loudness are discarded
pub const ABSOLUTE_GATE_LUFS: f64 = -70.0;

/// Relative gate position below the mean of the absolute-gated blocks
pub const RELATIVE_GATE_OFFSET_LU: f64 = -10.0;

/// Offset added to a block's power in dB to get its loudness
pub const BLOCK_LOUDNESS_OFFSET: f64 = -0.691;

/// Gating block length
pub const BLOCK_DURATION_SECS: f64 = 0.4;

/// Loudness contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoudnessMode {
    /// 400 ms blocks with absolute and relative gating
    #[default]
    Gated,
    /// Mean square of the whole filtered sequence, no blocking or gating
    SinglePass,
}

/// Loudness meter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoudnessConfig {
    /// Depth of the measured samples
    pub bit_depth: BitDepth,
    /// Sample rate, used for the block length
    pub sample_rate: SampleRate,
    /// Measurement contract
    pub mode: LoudnessMode,
}

impl LoudnessConfig {
    /// Create a gated configuration
    pub fn new(bit_depth: BitDepth, sample_rate: SampleRate) -> Self {
        Self {
            bit_depth,
            sample_rate,
            mode: LoudnessMode::default(),
        }
    }

    /// Set the measurement mode
    pub fn with_mode(mut self, mode: LoudnessMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.bit_depth.ensure_implemented("loudness")?;
        validate_sample_rate(self.sample_rate)
    }

    /// Samples per gating block, never less than one
    pub fn block_len(&self) -> usize {
        self.sample_rate.samples_for(BLOCK_DURATION_SECS).max(1)
    }
}

/// Result of a loudness measurement
#[derive(Debug, Clone, PartialEq)]
pub struct LoudnessMeasurement {
    /// Integrated loudness; negative infinity when nothing passes the gates
    pub integrated: f64,
    /// Relative gate threshold, if any block passed the absolute gate
    pub relative_threshold: Option<f64>,
    /// Blocks measured (0 in single-pass mode)
    pub total_blocks: usize,
    /// Blocks above the absolute gate
    pub above_absolute_gate: usize,
    /// Blocks passing both gates
    pub above_relative_gate: usize,
}

/// Block-gated loudness meter
#[derive(Debug, Clone)]
pub struct LoudnessMeter {
    config: LoudnessConfig,
}

impl LoudnessMeter {
    /// Create a meter
    pub fn new(config: LoudnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &LoudnessConfig {
        &self.config
    }

    /// Integrated loudness of a sample sequence
    pub fn integrated_loudness(&self, samples: &[i32]) -> Result<f64> {
        Ok(self.measure(samples)?.integrated)
    }

    /// Measure a sample sequence, reporting gate statistics
    ///
    /// # Errors
    ///
    /// Returns [`crate::XlawError::EmptyInput`] for an empty slice and
    /// [`crate::XlawError::Range`] for the first sample outside the
    /// configured depth.
    pub fn measure(&self, samples: &[i32]) -> Result<LoudnessMeasurement> {
        validate_block(samples, self.config.bit_depth, "loudness")?;
        let normalized = normalize(samples, self.config.bit_depth);

        match self.config.mode {
            LoudnessMode::SinglePass => Ok(LoudnessMeasurement {
                integrated: power_db(filter::mean_square(&normalized)),
                relative_threshold: None,
                total_blocks: 0,
                above_absolute_gate: 0,
                above_relative_gate: 0,
            }),
            LoudnessMode::Gated => Ok(gate(&block_powers(&normalized, self.config.block_len()))),
        }
    }
}

/// Gated integrated loudness with the default configuration
///
/// # Errors
///
/// Returns [`crate::XlawError::EmptyInput`],
/// [`crate::XlawError::UnsupportedFeature`] (48-bit),
/// [`crate::XlawError::InvalidRate`] or [`crate::XlawError::Range`].
pub fn integrated_loudness(
    samples: &[i32],
    bit_depth: BitDepth,
    sample_rate: SampleRate,
) -> Result<f64> {
    validate_non_empty(samples, "loudness")?;
    LoudnessMeter::new(LoudnessConfig::new(bit_depth, sample_rate))?.integrated_loudness(samples)
}

/// RMS level in dB relative to full scale
///
/// Negative infinity for an all-zero input.
pub fn rms_db(samples: &[i32], bit_depth: BitDepth) -> Result<f64> {
    validate_block(samples, bit_depth, "RMS")?;
    let max = bit_depth.max_value() as f64;
    let sum: f64 = samples
        .iter()
        .map(|&s| {
            let x = f64::from(s) / max;
            x * x
        })
        .sum();
    let rms = (sum / samples.len() as f64).sqrt();
    Ok(if rms > 0.0 {
        20.0 * rms.log10()
    } else {
        f64::NEG_INFINITY
    })
}

fn gate(powers: &[f64]) -> LoudnessMeasurement {
    let absolute: Vec<f64> = powers
        .iter()
        .copied()
        .filter(|&p| block_loudness(p) > ABSOLUTE_GATE_LUFS)
        .collect();

    if absolute.is_empty() {
        debug!("All {} blocks below the absolute gate", powers.len());
        return LoudnessMeasurement {
            integrated: f64::NEG_INFINITY,
            relative_threshold: None,
            total_blocks: powers.len(),
            above_absolute_gate: 0,
            above_relative_gate: 0,
        };
    }

    let threshold = power_db(mean(&absolute)) + RELATIVE_GATE_OFFSET_LU;
    let relative: Vec<f64> = absolute
        .iter()
        .copied()
        .filter(|&p| block_loudness(p) >= threshold)
        .collect();

    let integrated = if relative.is_empty() {
        f64::NEG_INFINITY
    } else {
        power_db(mean(&relative))
    };

    debug!(
        "Loudness gating: {} blocks, {} above absolute gate, {} above relative gate ({:.2}), integrated {:.2}",
        powers.len(),
        absolute.len(),
        relative.len(),
        threshold,
        integrated
    );

    LoudnessMeasurement {
        integrated,
        relative_threshold: Some(threshold),
        total_blocks: powers.len(),
        above_absolute_gate: absolute.len(),
        above_relative_gate: relative.len(),
    }
}

fn normalize(samples: &[i32], bit_depth: BitDepth) -> Vec<f64> {
    let max = bit_depth.max_value() as f64;
    map_samples(samples, |s| f64::from(s) / max)
}

/// Per-block K-weighted powers; trailing partial blocks are dropped unless
/// the input is shorter than one block
fn block_powers(normalized: &[f64], block_len: usize) -> Vec<f64> {
    if normalized.len() < block_len {
        return vec![filter::mean_square(normalized)];
    }
    normalized
        .par_chunks_exact(block_len)
        .map(filter::mean_square)
        .collect()
}

fn block_loudness(power: f64) -> f64 {
    BLOCK_LOUDNESS_OFFSET + power_db(power)
}

fn power_db(power: f64) -> f64 {
    if power > 0.0 {
        10.0 * power.log10()
    } else {
        f64::NEG_INFINITY
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
