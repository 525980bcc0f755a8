//! Companding codec implementations
//!
//! [`g711`] holds the per-law math and lookup tables. [`CompandingCodec`]
//! wraps a law with a linear bit depth, converting to and from the laws'
//! native 16-bit domain through a [`Requantizer`].

pub mod g711;

use crate::error::Result;
use crate::requantize::{Requantizer, RequantizerConfig};
use crate::types::{BitDepth, CodecConfig, CodecInfo, Compander, Law};
use crate::utils::validation::{validate_block, validate_buffer_sizes, validate_non_empty};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Batches at least this long are mapped on the rayon pool
pub(crate) const PARALLEL_THRESHOLD: usize = 1 << 14;

/// Seed offset for the decode-side requantizer
const DECODE_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Element-wise map that preserves order, parallel for long inputs
pub(crate) fn map_samples<T, U, F>(input: &[T], f: F) -> Vec<U>
where
    T: Copy + Sync,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    if input.len() >= PARALLEL_THRESHOLD {
        input.par_iter().map(|&x| f(x)).collect()
    } else {
        input.iter().map(|&x| f(x)).collect()
    }
}

/// Companding codec bound to a law and a linear bit depth
///
/// At 16-bit the codec is stateless. At any other depth it owns one
/// requantizer per direction, so consecutive calls continue the same noise
/// shaping sequence until [`CompandingCodec::reset`].
#[derive(Debug)]
pub struct CompandingCodec {
    config: CodecConfig,
    to_native: Option<Requantizer>,
    from_native: Option<Requantizer>,
}

impl CompandingCodec {
    /// Create a codec from a configuration
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;

        let (to_native, from_native) = if config.bit_depth == BitDepth::Bits16 {
            (None, None)
        } else {
            let to = build_requantizer(
                RequantizerConfig::new(config.bit_depth, BitDepth::Bits16),
                config.dither_seed,
            )?;
            let from = build_requantizer(
                RequantizerConfig::new(BitDepth::Bits16, config.bit_depth),
                config
                    .dither_seed
                    .map(|seed| seed.wrapping_add(DECODE_SEED_OFFSET)),
            )?;
            (Some(to), Some(from))
        };

        debug!(
            "Created {} codec: bit_depth={}, seeded={}",
            config.law,
            config.bit_depth,
            config.dither_seed.is_some()
        );

        Ok(Self {
            config,
            to_native,
            from_native,
        })
    }

    /// Create a codec by law name ("PCMU", "ULAW", "PCMA", "ALAW", ...)
    pub fn from_name(name: &str, bit_depth: BitDepth) -> Result<Self> {
        let law = Law::from_name(name)?;
        Self::new(CodecConfig::new(law).with_bit_depth(bit_depth))
    }

    /// Get the configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get the companding law
    pub fn law(&self) -> Law {
        self.config.law
    }

    /// Get codec information
    pub fn info(&self) -> CodecInfo {
        CodecInfo {
            name: self.config.law.name(),
            bit_depth: self.config.bit_depth,
            payload_type: self.config.law.payload_type(),
            linear_bytes_per_sample: self.config.bit_depth.byte_width(),
        }
    }

    /// Encode one sample at the configured depth
    pub fn encode_sample(&mut self, sample: i32) -> Result<u8> {
        self.config.bit_depth.check_sample(i64::from(sample))?;
        let native = match self.to_native.as_mut() {
            Some(requantizer) => requantizer.process_sample(sample)?,
            None => sample,
        };
        Ok(self.config.law.encode_sample(native as i16))
    }

    /// Decode one code word to the configured depth
    pub fn decode_sample(&mut self, encoded: u8) -> Result<i32> {
        let native = i32::from(self.config.law.decode_sample(encoded));
        match self.from_native.as_mut() {
            Some(requantizer) => requantizer.process_sample(native),
            None => Ok(native),
        }
    }

    /// Encode a sequence of samples
    ///
    /// # Errors
    ///
    /// Returns [`crate::XlawError::EmptyInput`] for an empty slice and
    /// [`crate::XlawError::Range`] for the first sample outside the
    /// configured depth. Nothing is encoded on failure.
    pub fn encode(&mut self, samples: &[i32]) -> Result<Vec<u8>> {
        validate_block(samples, self.config.bit_depth, "encode")?;
        trace!("Encoding {} samples as {}", samples.len(), self.config.law);

        let native: Vec<i16> = match self.to_native.as_mut() {
            Some(requantizer) => requantizer
                .process(samples)?
                .into_iter()
                .map(|s| s as i16)
                .collect(),
            None => samples.iter().map(|&s| s as i16).collect(),
        };
        self.config.law.encode(&native)
    }

    /// Decode a sequence of code words
    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<i32>> {
        validate_non_empty(data, "decode")?;
        trace!("Decoding {} bytes as {}", data.len(), self.config.law);

        let native: Vec<i32> = self
            .config
            .law
            .decode(data)?
            .into_iter()
            .map(i32::from)
            .collect();
        match self.from_native.as_mut() {
            Some(requantizer) => requantizer.process(&native),
            None => Ok(native),
        }
    }

    /// Encode into a caller-provided buffer, returning the bytes written
    pub fn encode_into(&mut self, samples: &[i32], output: &mut [u8]) -> Result<usize> {
        validate_buffer_sizes(samples.len(), output.len())?;
        let encoded = self.encode(samples)?;
        output[..encoded.len()].copy_from_slice(&encoded);
        Ok(encoded.len())
    }

    /// Decode into a caller-provided buffer, returning the samples written
    pub fn decode_into(&mut self, data: &[u8], output: &mut [i32]) -> Result<usize> {
        validate_buffer_sizes(data.len(), output.len())?;
        let decoded = self.decode(data)?;
        output[..decoded.len()].copy_from_slice(&decoded);
        Ok(decoded.len())
    }

    /// Restart the noise shaping sequence in both directions
    pub fn reset(&mut self) {
        for requantizer in [self.to_native.as_mut(), self.from_native.as_mut()]
            .into_iter()
            .flatten()
        {
            requantizer.reset();
        }
    }
}

fn build_requantizer(config: RequantizerConfig, seed: Option<u64>) -> Result<Requantizer> {
    match seed {
        Some(seed) => Requantizer::with_seed(config, seed),
        None => Requantizer::new(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XlawError;

    #[test]
    fn test_map_samples_preserves_order() {
        let input: Vec<i32> = (0..(PARALLEL_THRESHOLD as i32 * 2)).collect();
        let doubled = map_samples(&input, |x| x * 2);
        assert!(doubled.iter().enumerate().all(|(i, &v)| v == i as i32 * 2));

        let short = map_samples(&[1u8, 2, 3], u32::from);
        assert_eq!(short, vec![1, 2, 3]);
    }

    #[test]
    fn test_codec_16_bit_matches_law() {
        let mut codec = CompandingCodec::new(CodecConfig::mulaw()).unwrap();
        let samples = [0, 1000, -1000, 32767, -32768];
        let encoded = codec.encode(&samples).unwrap();
        let expected: Vec<u8> = samples
            .iter()
            .map(|&s| Law::MuLaw.encode_sample(s as i16))
            .collect();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_codec_info() {
        let codec = CompandingCodec::from_name("alaw", BitDepth::Bits24).unwrap();
        let info = codec.info();
        assert_eq!(info.name, "PCMA");
        assert_eq!(info.payload_type, 8);
        assert_eq!(info.linear_bytes_per_sample, 3);
        assert_eq!(codec.law(), Law::ALaw);
    }

    #[test]
    fn test_codec_rejects_out_of_range() {
        let mut codec =
            CompandingCodec::new(CodecConfig::alaw().with_bit_depth(BitDepth::Bits8)).unwrap();
        assert!(matches!(
            codec.encode_sample(200),
            Err(XlawError::Range { sample: 200, bit_depth: 8, .. })
        ));
        assert!(matches!(
            codec.encode(&[0, 1, -129]),
            Err(XlawError::Range { sample: -129, .. })
        ));
    }

    #[test]
    fn test_codec_48_bit_unsupported() {
        assert!(matches!(
            CompandingCodec::new(CodecConfig::mulaw().with_bit_depth(BitDepth::Bits48)),
            Err(XlawError::UnsupportedFeature { .. })
        ));
    }

    #[test]
    fn test_encode_into_buffer_too_small() {
        let mut codec = CompandingCodec::new(CodecConfig::mulaw()).unwrap();
        let mut output = [0u8; 2];
        assert_eq!(
            codec.encode_into(&[1, 2, 3], &mut output),
            Err(XlawError::BufferTooSmall {
                needed: 3,
                actual: 2
            })
        );
        let mut output = [0u8; 4];
        assert_eq!(codec.encode_into(&[0, 0, 0], &mut output).unwrap(), 3);
        assert_eq!(&output[..3], &[0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_seeded_codec_is_reproducible() {
        let config = CodecConfig::alaw()
            .with_bit_depth(BitDepth::Bits24)
            .with_dither_seed(99);
        let samples: Vec<i32> = (0..1000).map(|i| (i * 7919) % 8_000_000 - 4_000_000).collect();

        let mut a = CompandingCodec::new(config.clone()).unwrap();
        let mut b = CompandingCodec::new(config).unwrap();
        assert_eq!(a.encode(&samples).unwrap(), b.encode(&samples).unwrap());

        a.reset();
        b.reset();
        assert_eq!(a.decode(&[0x12, 0x34]).unwrap(), b.decode(&[0x12, 0x34]).unwrap());
    }
}
