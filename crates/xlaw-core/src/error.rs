//! Error handling for the sample-transform library
//!
//! Every failure in this crate is an input-validation failure detected before
//! any output is produced. Nothing is retried internally: a pure computation
//! has no transient conditions.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for sample-transform operations
pub type Result<T> = std::result::Result<T, XlawError>;

/// Error type for companding, requantization and loudness operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XlawError {
    /// Sample exceeds the legal range for its declared bit depth
    #[error("Sample {sample} out of range for {bit_depth}-bit audio ({min}..={max})")]
    Range {
        sample: i64,
        bit_depth: u32,
        min: i64,
        max: i64,
    },

    /// Bit depth outside the supported set, or a disallowed depth combination
    #[error("Invalid bit depth {bits}: {reason}")]
    InvalidBitDepth { bits: u32, reason: String },

    /// Zero-length sequence where a non-empty one is required
    #[error("Empty input: {operation} requires at least one sample")]
    EmptyInput { operation: String },

    /// Sample rate is not positive
    #[error("Invalid sample rate: {rate}Hz (must be positive)")]
    InvalidRate { rate: u32 },

    /// Recognized but unimplemented feature (e.g. 48-bit processing)
    #[error("Unsupported feature: {feature} is not implemented")]
    UnsupportedFeature { feature: String },

    /// Caller-provided output buffer is too short
    #[error("Buffer too small: need {needed} elements, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Raw byte buffer does not hold a whole number of samples
    #[error("Invalid buffer length: {len} bytes is not a multiple of the {width}-byte sample width")]
    InvalidBufferLength { len: usize, width: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },
}

impl XlawError {
    /// Create a new range error
    pub fn range(sample: i64, bit_depth: u32, min: i64, max: i64) -> Self {
        Self::Range {
            sample,
            bit_depth,
            min,
            max,
        }
    }

    /// Create a new invalid bit depth error
    pub fn invalid_bit_depth(bits: u32, reason: impl Into<String>) -> Self {
        Self::InvalidBitDepth {
            bits,
            reason: reason.into(),
        }
    }

    /// Create a new empty input error
    pub fn empty_input(operation: impl Into<String>) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Create a new unsupported feature error
    pub fn unsupported_feature(feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Range { .. } | Self::EmptyInput { .. } => ErrorCategory::Input,

            Self::InvalidBitDepth { .. }
            | Self::InvalidRate { .. }
            | Self::InvalidConfig { .. } => ErrorCategory::Configuration,

            Self::BufferTooSmall { .. } | Self::InvalidBufferLength { .. } => {
                ErrorCategory::Buffer
            }

            Self::UnsupportedFeature { .. } => ErrorCategory::Unsupported,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad sample values or empty sequences
    Input,
    /// Bad bit depth, sample rate or configuration
    Configuration,
    /// Caller buffer sizing problems
    Buffer,
    /// Recognized but unimplemented
    Unsupported,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Configuration => write!(f, "Configuration"),
            Self::Buffer => write!(f, "Buffer"),
            Self::Unsupported => write!(f, "Unsupported"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = XlawError::invalid_bit_depth(12, "not a supported depth");
        assert!(matches!(err, XlawError::InvalidBitDepth { bits: 12, .. }));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            XlawError::range(40000, 16, -32768, 32767).category(),
            ErrorCategory::Input
        );
        assert_eq!(
            XlawError::empty_input("encode").category(),
            ErrorCategory::Input
        );
        assert_eq!(
            XlawError::InvalidRate { rate: 0 }.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            XlawError::BufferTooSmall { needed: 10, actual: 5 }.category(),
            ErrorCategory::Buffer
        );
        assert_eq!(
            XlawError::unsupported_feature("48-bit loudness").category(),
            ErrorCategory::Unsupported
        );
    }

    #[test]
    fn test_error_display() {
        let err = XlawError::range(40000, 16, -32768, 32767);
        let display = format!("{}", err);
        assert!(display.contains("40000"));
        assert!(display.contains("16-bit"));

        let err = XlawError::InvalidBufferLength { len: 5, width: 2 };
        assert!(err.to_string().contains("5 bytes"));
    }
}
