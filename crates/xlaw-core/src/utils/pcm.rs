//! Little-endian linear PCM packing
//!
//! Samples are stored as signed two's-complement integers, `ceil(bits / 8)`
//! bytes each, least significant byte first.

use crate::error::{Result, XlawError};
use crate::types::BitDepth;
use crate::utils::validation::validate_samples;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Pack samples into a little-endian byte buffer
///
/// # Errors
///
/// Returns [`XlawError::Range`] if any sample does not fit `bit_depth`, and
/// [`XlawError::UnsupportedFeature`] for 48-bit.
pub fn pack(samples: &[i32], bit_depth: BitDepth) -> Result<Bytes> {
    validate_samples(samples, bit_depth, "PCM packing")?;
    let width = bit_depth.byte_width();

    let mut buf = BytesMut::with_capacity(samples.len() * width);
    for &sample in samples {
        buf.put_int_le(i64::from(sample), width);
    }
    Ok(buf.freeze())
}

/// Unpack a little-endian byte buffer into samples
///
/// # Errors
///
/// Returns [`XlawError::InvalidBufferLength`] when the buffer length is not
/// a multiple of the sample width.
pub fn unpack(data: &[u8], bit_depth: BitDepth) -> Result<Vec<i32>> {
    bit_depth.ensure_implemented("PCM unpacking")?;
    let width = bit_depth.byte_width();
    if data.len() % width != 0 {
        return Err(XlawError::InvalidBufferLength {
            len: data.len(),
            width,
        });
    }

    let shift = 64 - 8 * width as u32;
    let mut buf = data;
    let mut samples = Vec::with_capacity(data.len() / width);
    while buf.has_remaining() {
        let raw = buf.get_uint_le(width);
        // Sign-extend from the sample width
        samples.push((((raw << shift) as i64) >> shift) as i32);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_16_bit_layout() {
        let bytes = pack(&[1, -1, 0x1234], BitDepth::Bits16).unwrap();
        assert_eq!(&bytes[..], &[0x01, 0x00, 0xff, 0xff, 0x34, 0x12]);
    }

    #[test]
    fn test_pack_24_bit_layout() {
        let bytes = pack(&[8_388_607, -8_388_608], BitDepth::Bits24).unwrap();
        assert_eq!(&bytes[..], &[0xff, 0xff, 0x7f, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn test_unpack_sign_extends() {
        assert_eq!(unpack(&[0x80], BitDepth::Bits8).unwrap(), vec![-128]);
        assert_eq!(
            unpack(&[0x00, 0x00, 0x80], BitDepth::Bits24).unwrap(),
            vec![-8_388_608]
        );
        assert_eq!(
            unpack(&[0x00, 0x00, 0x00, 0x80], BitDepth::Bits32).unwrap(),
            vec![i32::MIN]
        );
    }

    #[test]
    fn test_pack_rejects_out_of_range() {
        assert!(matches!(
            pack(&[0, 128], BitDepth::Bits8),
            Err(XlawError::Range { sample: 128, .. })
        ));
    }

    #[test]
    fn test_unpack_rejects_partial_samples() {
        assert_eq!(
            unpack(&[0, 1, 2, 3, 4], BitDepth::Bits24),
            Err(XlawError::InvalidBufferLength { len: 5, width: 3 })
        );
    }

    #[test]
    fn test_empty_buffers() {
        assert!(pack(&[], BitDepth::Bits16).unwrap().is_empty());
        assert!(unpack(&[], BitDepth::Bits16).unwrap().is_empty());
    }

    #[test]
    fn test_48_bit_unsupported() {
        assert_eq!(
            pack(&[0], BitDepth::Bits48),
            Err(XlawError::unsupported_feature("48-bit PCM packing"))
        );
        assert!(matches!(
            unpack(&[0; 6], BitDepth::Bits48),
            Err(XlawError::UnsupportedFeature { .. })
        ));
    }
}
