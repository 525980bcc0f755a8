//! G.711 μ-law companding
//!
//! Biased-magnitude form of the μ-law compressor: the magnitude is offset by
//! `0x84`, clipped, and its segment read from a 256-entry table. The code word
//! is stored ones'-complemented, so silence encodes to `0xFF`.

use crate::error::{Result, XlawError};

/// Bias added to the magnitude before segment lookup
pub const BIAS: i32 = 0x84;

/// Largest biased magnitude
pub const CLIP: i32 = 32635;

/// Segment for the biased magnitude's bits 14–7
pub const ENCODE_TABLE: [u8; 256] = [
    0, 0, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, //
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, //
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, //
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, //
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, //
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, //
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, //
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
];

/// Base magnitude of each segment
pub const DECODE_TABLE: [i32; 8] = [0, 132, 396, 924, 1980, 4092, 8316, 16764];

/// Compress a 16-bit linear PCM sample to an 8-bit μ-law code word
///
/// # Arguments
///
/// * `sample` - Input linear PCM sample (16-bit signed)
///
/// # Returns
///
/// μ-law encoded sample (8-bit)
pub fn encode_sample(sample: i16) -> u8 {
    let mut value = i32::from(sample);

    // Sign-magnitude split
    let sign = (value >> 8) & 0x80;
    if sign != 0 {
        value = -value;
    }

    let biased = (value + BIAS).min(CLIP);
    let exponent = i32::from(ENCODE_TABLE[((biased >> 7) & 0xFF) as usize]);
    let mantissa = (biased >> (exponent + 3)) & 0x0F;

    !((sign | (exponent << 4) | mantissa) as u8)
}

/// Expand an 8-bit μ-law code word to a 16-bit linear PCM sample
pub fn decode_sample(encoded: u8) -> i16 {
    let code = !encoded;
    let exponent = (code >> 4) & 0x07;
    let mantissa = i32::from(code & 0x0F);

    let magnitude = DECODE_TABLE[exponent as usize] + (mantissa << (exponent + 3));
    let sample = if code & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    sample as i16
}

/// Width of the decision interval covered by a code word
pub fn quantization_step(encoded: u8) -> i32 {
    let exponent = ((!encoded) >> 4) & 0x07;
    1 << (exponent + 3)
}

/// Encode a sequence of 16-bit samples to μ-law
///
/// # Errors
///
/// Returns [`XlawError::EmptyInput`] for an empty slice.
pub fn encode(samples: &[i16]) -> Result<Vec<u8>> {
    if samples.is_empty() {
        return Err(XlawError::empty_input("μ-law encode"));
    }
    Ok(samples.iter().map(|&s| encode_sample(s)).collect())
}

/// Decode a sequence of μ-law code words to 16-bit samples
///
/// # Errors
///
/// Returns [`XlawError::EmptyInput`] for an empty slice.
pub fn decode(data: &[u8]) -> Result<Vec<i16>> {
    if data.is_empty() {
        return Err(XlawError::empty_input("μ-law decode"));
    }
    Ok(data.iter().map(|&b| decode_sample(b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_table_matches_bias() {
        // Segment bases are 132 * 2^e - 132
        for (exponent, &base) in DECODE_TABLE.iter().enumerate() {
            assert_eq!(base, BIAS * (1 << exponent) - BIAS);
        }
    }

    #[test]
    fn test_silence() {
        assert_eq!(encode_sample(0), 0xff);
        assert_eq!(decode_sample(0xff), 0);
        // Negative zero decodes to silence as well
        assert_eq!(decode_sample(0x7f), 0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(encode_sample(128), 0xef);
        assert_eq!(encode_sample(1024), 0xcd);
        assert_eq!(encode_sample(-128), 0x6f);
        assert_eq!(encode_sample(-1024), 0x4d);
        assert_eq!(encode_sample(32767), 0x80);
        assert_eq!(encode_sample(i16::MIN), 0x00);

        assert_eq!(decode_sample(0xef), 132);
        assert_eq!(decode_sample(0xcd), 1052);
        assert_eq!(decode_sample(0x6f), -132);
        assert_eq!(decode_sample(0x4d), -1052);
        assert_eq!(decode_sample(0x80), 32124);
        assert_eq!(decode_sample(0x00), -32124);
    }

    #[test]
    fn test_quantization_step() {
        assert_eq!(quantization_step(0xff), 8);
        assert_eq!(quantization_step(encode_sample(1000)), 64);
        assert_eq!(quantization_step(encode_sample(-30000)), 1024);
    }

    #[test]
    fn test_sequence_helpers() {
        let samples = [0i16, 100, -100, 1000, -1000];
        let encoded = encode(&samples).unwrap();
        let decoded = decode(&encoded).unwrap();
        for (original, recovered) in samples.iter().zip(decoded.iter()) {
            assert!((recovered - original).abs() <= 64);
        }
        assert!(matches!(encode(&[]), Err(XlawError::EmptyInput { .. })));
    }
}
