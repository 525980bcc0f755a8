//! Input validation utilities for sample operations
//!
//! Every public operation validates its whole input before producing output,
//! so a failing batch leaves no partial results or mutated state behind.

use crate::error::{Result, XlawError};
use crate::types::{BitDepth, SampleRate};

/// Reject a zero-length sequence
pub fn validate_non_empty<T>(samples: &[T], operation: &str) -> Result<()> {
    if samples.is_empty() {
        return Err(XlawError::empty_input(operation));
    }
    Ok(())
}

/// Validate every sample against a bit depth
///
/// Fails on the first offending sample, in input order. `operation` names
/// the caller in the error for an unimplemented depth.
pub fn validate_samples(samples: &[i32], bit_depth: BitDepth, operation: &str) -> Result<()> {
    bit_depth.ensure_implemented(operation)?;
    match samples
        .iter()
        .position(|&sample| !bit_depth.contains(i64::from(sample)))
    {
        Some(index) => {
            tracing::trace!("Sample at index {} out of range for {}", index, bit_depth);
            bit_depth.check_sample(i64::from(samples[index]))
        }
        None => Ok(()),
    }
}

/// Validate a non-empty sample block at a given depth
pub fn validate_block(samples: &[i32], bit_depth: BitDepth, operation: &str) -> Result<()> {
    validate_non_empty(samples, operation)?;
    validate_samples(samples, bit_depth, operation)
}

/// Validate a sample rate
pub fn validate_sample_rate(sample_rate: SampleRate) -> Result<()> {
    sample_rate.validate()
}

/// Validate an output buffer is at least as long as the input
pub fn validate_buffer_sizes(input_size: usize, output_size: usize) -> Result<()> {
    if output_size < input_size {
        return Err(XlawError::BufferTooSmall {
            needed: input_size,
            actual: output_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty(&[1i32], "encode").is_ok());
        let empty: [i32; 0] = [];
        assert!(matches!(
            validate_non_empty(&empty, "encode"),
            Err(XlawError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_validate_samples_reports_first_offender() {
        let samples = [0, 127, 200, -300];
        assert_eq!(
            validate_samples(&samples, BitDepth::Bits8, "encode"),
            Err(XlawError::range(200, 8, -128, 127))
        );
        assert!(validate_samples(&[-128, 127], BitDepth::Bits8, "encode").is_ok());
    }

    #[test]
    fn test_validate_samples_full_32_bit_range() {
        let extremes = [i32::MIN, i32::MAX];
        assert!(validate_samples(&extremes, BitDepth::Bits32, "PCM packing").is_ok());
    }

    #[test]
    fn test_validate_block() {
        assert!(validate_block(&[0, 1], BitDepth::Bits16, "loudness").is_ok());
        assert!(matches!(
            validate_block(&[0, 1], BitDepth::Bits48, "loudness"),
            Err(XlawError::UnsupportedFeature { .. })
        ));
        assert!(matches!(
            validate_block(&[], BitDepth::Bits16, "loudness"),
            Err(XlawError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_unsupported_depth_names_operation() {
        let err = validate_samples(&[0], BitDepth::Bits48, "PCM packing").unwrap_err();
        assert_eq!(err, XlawError::unsupported_feature("48-bit PCM packing"));
        assert_eq!(err.to_string(), "Unsupported feature: 48-bit PCM packing is not implemented");
    }

    #[test]
    fn test_validate_buffer_sizes() {
        assert!(validate_buffer_sizes(160, 160).is_ok());
        assert!(validate_buffer_sizes(160, 320).is_ok());
        assert_eq!(
            validate_buffer_sizes(160, 80),
            Err(XlawError::BufferTooSmall {
                needed: 160,
                actual: 80
            })
        );
    }

    #[test]
    fn test_validate_sample_rate() {
        assert!(validate_sample_rate(SampleRate::Rate8000).is_ok());
        assert_eq!(
            validate_sample_rate(SampleRate::Custom(0)),
            Err(XlawError::InvalidRate { rate: 0 })
        );
    }
}
