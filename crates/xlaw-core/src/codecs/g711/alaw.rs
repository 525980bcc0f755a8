//! G.711 A-law companding
//!
//! Segment/mantissa form of the A-law compressor. The encoder works on the
//! sign-magnitude representation of the input, picks the segment from a
//! 128-entry log table indexed by the magnitude's high byte, and toggles the
//! even bits of the result with `0x55`.
//!
//! ## Code word layout
//!
//! After removing the `0x55` toggle: bit 7 is the sign (set for positive
//! samples), bits 6–4 the segment and bits 3–0 the mantissa.

use crate::error::{Result, XlawError};

/// Even-bit toggle mask applied to every code word
pub const XOR_MASK: i32 = 0x55;

/// Largest magnitude the encoder represents exactly
pub const CLIP: i32 = 32635;

/// Segment for a magnitude's high byte (`(magnitude >> 8) & 0x7F`)
pub const LOG_TABLE: [u8; 128] = [
    1, 1, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, //
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, //
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, //
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, //
];

/// Compress a 16-bit linear PCM sample to an 8-bit A-law code word
///
/// # Arguments
///
/// * `sample` - Input linear PCM sample (16-bit signed)
///
/// # Returns
///
/// A-law encoded sample (8-bit)
pub fn encode_sample(sample: i16) -> u8 {
    // -32768 has no positive counterpart in 16 bits
    let mut value = if sample == i16::MIN {
        -32767
    } else {
        i32::from(sample)
    };

    let sign = (!value >> 8) & 0x80;
    if sign == 0 {
        value = -value;
    }
    let magnitude = value.min(CLIP);

    let companded = if magnitude >= 256 {
        let exponent = i32::from(LOG_TABLE[((magnitude >> 8) & 0x7F) as usize]);
        let mantissa = (magnitude >> (exponent + 3)) & 0x0F;
        (exponent << 4) | mantissa
    } else {
        magnitude >> 4
    };

    (companded ^ (sign ^ XOR_MASK)) as u8
}

/// Expand an 8-bit A-law code word to a 16-bit linear PCM sample
///
/// The reconstruction sits in the middle of the code word's decision
/// interval.
pub fn decode_sample(encoded: u8) -> i16 {
    let mut code = i32::from(encoded) ^ XOR_MASK;
    let sign_set = code & 0x80 != 0;
    if sign_set {
        code &= 0x7F;
    }

    let position = ((code & 0xF0) >> 4) + 4;
    let magnitude = if position != 4 {
        (1 << position) | ((code & 0x0F) << (position - 4)) | (1 << (position - 5))
    } else {
        (code << 1) | 1
    };

    let signed = if sign_set { -magnitude } else { magnitude };
    // Scale back to 16 bits; the set sign bit marks a positive sample.
    (-(signed * 8)) as i16
}

/// Width of the decision interval covered by a code word
pub fn quantization_step(encoded: u8) -> i32 {
    let segment = ((i32::from(encoded) ^ XOR_MASK) >> 4) & 0x07;
    if segment == 0 {
        16
    } else {
        1 << (segment + 3)
    }
}

/// Encode a sequence of 16-bit samples to A-law
///
/// # Errors
///
/// Returns [`XlawError::EmptyInput`] for an empty slice.
pub fn encode(samples: &[i16]) -> Result<Vec<u8>> {
    if samples.is_empty() {
        return Err(XlawError::empty_input("A-law encode"));
    }
    Ok(samples.iter().map(|&s| encode_sample(s)).collect())
}

/// Decode a sequence of A-law code words to 16-bit samples
///
/// # Errors
///
/// Returns [`XlawError::EmptyInput`] for an empty slice.
pub fn decode(data: &[u8]) -> Result<Vec<i16>> {
    if data.is_empty() {
        return Err(XlawError::empty_input("A-law decode"));
    }
    Ok(data.iter().map(|&b| decode_sample(b)).collect())
}
