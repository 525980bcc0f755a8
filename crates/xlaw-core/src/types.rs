//! Core types and traits for the sample-transform library
//!
//! This module defines the bit-depth model shared by every component, the
//! companding law selector and its trait, and the codec configuration.

use crate::codecs::g711::{alaw, mulaw, tables};
use crate::error::{Result, XlawError};
use std::fmt;

/// Linear PCM bit depth
///
/// A sample at depth `b` is a signed integer in `[-2^(b-1), 2^(b-1) - 1]`.
/// 48-bit is recognized so that callers get a clear "not implemented" error
/// instead of a generic validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitDepth {
    /// 8-bit signed PCM
    Bits8,
    /// 16-bit signed PCM (the companding laws' native domain)
    Bits16,
    /// 24-bit signed PCM
    Bits24,
    /// 32-bit signed PCM
    Bits32,
    /// 48-bit PCM (reserved, not implemented)
    Bits48,
}

impl BitDepth {
    /// Bit depths every operation accepts
    pub const SUPPORTED: [BitDepth; 4] = [Self::Bits8, Self::Bits16, Self::Bits24, Self::Bits32];

    /// Number of bits per sample
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
            Self::Bits48 => 48,
        }
    }

    /// Create from a bit count
    ///
    /// # Errors
    ///
    /// Returns [`XlawError::InvalidBitDepth`] for anything other than
    /// 8, 16, 24, 32 or 48.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(Self::Bits8),
            16 => Ok(Self::Bits16),
            24 => Ok(Self::Bits24),
            32 => Ok(Self::Bits32),
            48 => Ok(Self::Bits48),
            other => Err(XlawError::invalid_bit_depth(
                other,
                "supported values are 8, 16, 24 and 32",
            )),
        }
    }

    /// Check whether sample processing exists for this depth
    pub fn is_implemented(self) -> bool {
        !matches!(self, Self::Bits48)
    }

    /// Fail with [`XlawError::UnsupportedFeature`] for reserved depths
    pub fn ensure_implemented(self, operation: &str) -> Result<()> {
        if self.is_implemented() {
            Ok(())
        } else {
            Err(XlawError::unsupported_feature(format!(
                "{}-bit {}",
                self.bits(),
                operation
            )))
        }
    }

    /// Largest legal sample value, `2^(b-1) - 1`
    pub fn max_value(self) -> i64 {
        (1i64 << (self.bits() - 1)) - 1
    }

    /// Smallest legal sample value, `-2^(b-1)`
    pub fn min_value(self) -> i64 {
        -(1i64 << (self.bits() - 1))
    }

    /// Bytes per sample in packed little-endian form
    pub fn byte_width(self) -> usize {
        (self.bits() as usize + 7) / 8
    }

    /// Check if a sample value is legal at this depth
    pub fn contains(self, sample: i64) -> bool {
        (self.min_value()..=self.max_value()).contains(&sample)
    }

    /// Validate a sample value against this depth's range
    ///
    /// # Errors
    ///
    /// Returns [`XlawError::Range`] when the sample is outside the range.
    pub fn check_sample(self, sample: i64) -> Result<()> {
        if self.contains(sample) {
            Ok(())
        } else {
            Err(XlawError::range(
                sample,
                self.bits(),
                self.min_value(),
                self.max_value(),
            ))
        }
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = XlawError;

    fn try_from(bits: u32) -> Result<Self> {
        Self::from_bits(bits)
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Sample rate enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRate {
    /// 8 kHz (narrowband telephony)
    Rate8000,
    /// 16 kHz (wideband)
    Rate16000,
    /// 44.1 kHz (CD quality)
    Rate44100,
    /// 48 kHz (professional)
    Rate48000,
    /// Custom sample rate
    Custom(u32),
}

impl SampleRate {
    /// Get the sample rate value in Hz
    pub fn hz(self) -> u32 {
        match self {
            Self::Rate8000 => 8000,
            Self::Rate16000 => 16000,
            Self::Rate44100 => 44100,
            Self::Rate48000 => 48000,
            Self::Custom(rate) => rate,
        }
    }

    /// Create from Hz value
    pub fn from_hz(hz: u32) -> Self {
        match hz {
            8000 => Self::Rate8000,
            16000 => Self::Rate16000,
            44100 => Self::Rate44100,
            48000 => Self::Rate48000,
            rate => Self::Custom(rate),
        }
    }

    /// Reject a zero rate
    ///
    /// # Errors
    ///
    /// Returns [`XlawError::InvalidRate`] when the rate is 0 Hz.
    pub fn validate(self) -> Result<()> {
        if self.hz() == 0 {
            return Err(XlawError::InvalidRate { rate: self.hz() });
        }
        Ok(())
    }

    /// Number of whole samples covering `seconds`, rounded down
    pub fn samples_for(self, seconds: f64) -> usize {
        (seconds * f64::from(self.hz())).floor() as usize
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.hz())
    }
}

/// Primary trait for 8-bit companding laws
///
/// The per-sample methods are total over the 16-bit domain. The sequence
/// methods reject empty input, matching the rest of the library.
pub trait Compander: Send + Sync {
    /// Compress one 16-bit linear sample to a code word
    fn encode_sample(&self, sample: i16) -> u8;

    /// Expand one code word to a 16-bit linear sample
    fn decode_sample(&self, encoded: u8) -> i16;

    /// Width of the decision interval the code word represents
    fn quantization_step(&self, encoded: u8) -> i32;

    /// Encode a sequence of 16-bit samples
    ///
    /// # Errors
    ///
    /// Returns [`XlawError::EmptyInput`] for an empty slice.
    fn encode(&self, samples: &[i16]) -> Result<Vec<u8>> {
        if samples.is_empty() {
            return Err(XlawError::empty_input("encode"));
        }
        Ok(crate::codecs::map_samples(samples, |s| self.encode_sample(s)))
    }

    /// Decode a sequence of code words
    ///
    /// # Errors
    ///
    /// Returns [`XlawError::EmptyInput`] for an empty slice.
    fn decode(&self, data: &[u8]) -> Result<Vec<i16>> {
        if data.is_empty() {
            return Err(XlawError::empty_input("decode"));
        }
        Ok(crate::codecs::map_samples(data, |b| self.decode_sample(b)))
    }
}

/// Companding law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Law {
    /// G.711 μ-law (PCMU)
    MuLaw,
    /// G.711 A-law (PCMA)
    ALaw,
}

impl Law {
    /// All laws
    pub const ALL: [Law; 2] = [Self::MuLaw, Self::ALaw];

    /// Get the law's RTP encoding name
    pub fn name(self) -> &'static str {
        match self {
            Self::MuLaw => "PCMU",
            Self::ALaw => "PCMA",
        }
    }

    /// Look up a law by name
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_uppercase().as_str() {
            "PCMU" | "ULAW" | "MULAW" | "U-LAW" => Ok(Self::MuLaw),
            "PCMA" | "ALAW" | "A-LAW" => Ok(Self::ALaw),
            _ => Err(XlawError::invalid_config(format!("unknown law: {}", name))),
        }
    }

    /// Get the standard RTP payload type
    pub fn payload_type(self) -> u8 {
        match self {
            Self::MuLaw => 0,
            Self::ALaw => 8,
        }
    }

    /// Code word produced for a zero sample
    pub fn silence_byte(self) -> u8 {
        match self {
            Self::MuLaw => 0xFF,
            Self::ALaw => 0xD5,
        }
    }
}

impl Compander for Law {
    fn encode_sample(&self, sample: i16) -> u8 {
        match self {
            Self::MuLaw => tables::mulaw_compress_table(sample),
            Self::ALaw => tables::alaw_compress_table(sample),
        }
    }

    fn decode_sample(&self, encoded: u8) -> i16 {
        match self {
            Self::MuLaw => tables::mulaw_expand_table(encoded),
            Self::ALaw => tables::alaw_expand_table(encoded),
        }
    }

    fn quantization_step(&self, encoded: u8) -> i32 {
        match self {
            Self::MuLaw => mulaw::quantization_step(encoded),
            Self::ALaw => alaw::quantization_step(encoded),
        }
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Companding codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Law name ("PCMU" or "PCMA")
    pub name: &'static str,
    /// Linear bit depth on the PCM side
    pub bit_depth: BitDepth,
    /// RTP payload type
    pub payload_type: u8,
    /// Packed bytes per linear sample
    pub linear_bytes_per_sample: usize,
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Companding law
    pub law: Law,
    /// Bit depth of the linear samples handed to and returned by the codec
    pub bit_depth: BitDepth,
    /// Seed for the requantizer's dither; `None` seeds from entropy
    pub dither_seed: Option<u64>,
}

impl CodecConfig {
    /// Create a new codec configuration at the native 16-bit depth
    pub fn new(law: Law) -> Self {
        Self {
            law,
            bit_depth: BitDepth::Bits16,
            dither_seed: None,
        }
    }

    /// Create μ-law configuration
    pub fn mulaw() -> Self {
        Self::new(Law::MuLaw)
    }

    /// Create A-law configuration
    pub fn alaw() -> Self {
        Self::new(Law::ALaw)
    }

    /// Set the linear bit depth
    pub fn with_bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Seed the dither generator for reproducible output
    pub fn with_dither_seed(mut self, seed: u64) -> Self {
        self.dither_seed = Some(seed);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.bit_depth.ensure_implemented("companding")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_depth_ranges() {
        assert_eq!(BitDepth::Bits8.max_value(), 127);
        assert_eq!(BitDepth::Bits8.min_value(), -128);
        assert_eq!(BitDepth::Bits16.max_value(), 32767);
        assert_eq!(BitDepth::Bits24.max_value(), 8_388_607);
        assert_eq!(BitDepth::Bits32.max_value(), i64::from(i32::MAX));
        assert_eq!(BitDepth::Bits32.min_value(), i64::from(i32::MIN));
    }

    #[test]
    fn test_bit_depth_from_bits() {
        assert_eq!(BitDepth::from_bits(24).unwrap(), BitDepth::Bits24);
        assert_eq!(BitDepth::try_from(8).unwrap(), BitDepth::Bits8);
        assert!(matches!(
            BitDepth::from_bits(12),
            Err(XlawError::InvalidBitDepth { bits: 12, .. })
        ));
        // 48-bit parses but is not implemented
        let deep = BitDepth::from_bits(48).unwrap();
        assert!(!deep.is_implemented());
        assert!(matches!(
            deep.ensure_implemented("loudness"),
            Err(XlawError::UnsupportedFeature { .. })
        ));
    }

    #[test]
    fn test_byte_width() {
        assert_eq!(BitDepth::Bits8.byte_width(), 1);
        assert_eq!(BitDepth::Bits16.byte_width(), 2);
        assert_eq!(BitDepth::Bits24.byte_width(), 3);
        assert_eq!(BitDepth::Bits32.byte_width(), 4);
        assert_eq!(BitDepth::Bits48.byte_width(), 6);
    }

    #[test]
    fn test_check_sample() {
        assert!(BitDepth::Bits16.check_sample(-32768).is_ok());
        assert!(BitDepth::Bits16.check_sample(32767).is_ok());
        assert!(matches!(
            BitDepth::Bits16.check_sample(32768),
            Err(XlawError::Range { sample: 32768, bit_depth: 16, .. })
        ));
        assert!(BitDepth::Bits8.check_sample(-129).is_err());
    }

    #[test]
    fn test_sample_rate_conversion() {
        assert_eq!(SampleRate::Rate8000.hz(), 8000);
        assert_eq!(SampleRate::from_hz(48000), SampleRate::Rate48000);
        assert_eq!(SampleRate::from_hz(22050), SampleRate::Custom(22050));
        assert_eq!(SampleRate::Rate48000.samples_for(0.4), 19200);
        assert_eq!(SampleRate::Rate44100.samples_for(0.4), 17640);
        assert!(SampleRate::Custom(0).validate().is_err());
    }

    #[test]
    fn test_law_properties() {
        assert_eq!(Law::MuLaw.name(), "PCMU");
        assert_eq!(Law::ALaw.payload_type(), 8);
        assert_eq!(Law::from_name("ulaw").unwrap(), Law::MuLaw);
        assert_eq!(Law::from_name("PCMA").unwrap(), Law::ALaw);
        assert!(Law::from_name("G722").is_err());
    }

    #[test]
    fn test_silence_byte_matches_encoder() {
        for law in Law::ALL {
            assert_eq!(law.encode_sample(0), law.silence_byte(), "{}", law);
        }
    }

    #[test]
    fn test_codec_config_validation() {
        assert!(CodecConfig::mulaw().validate().is_ok());
        assert!(CodecConfig::alaw()
            .with_bit_depth(BitDepth::Bits24)
            .validate()
            .is_ok());
        assert!(CodecConfig::alaw()
            .with_bit_depth(BitDepth::Bits48)
            .validate()
            .is_err());
    }
}
