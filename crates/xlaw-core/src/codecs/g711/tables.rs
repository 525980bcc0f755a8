//! Full-range G.711 lookup tables
//!
//! Pre-computed tables for A-law and μ-law encoding and decoding, generated
//! lazily from the algorithmic implementations in [`super::alaw`] and
//! [`super::mulaw`].
//!
//! ## Memory Usage
//!
//! - μ-law encode table: 65536 bytes (64KB)
//! - μ-law decode table: 512 bytes (256 samples × 2 bytes)
//! - A-law encode table: 65536 bytes (64KB)
//! - A-law decode table: 512 bytes (256 samples × 2 bytes)
//! - Total: ~130KB of lookup tables

use super::{alaw, mulaw};
use std::sync::LazyLock;

/// Number of distinct 16-bit input values
const INPUT_RANGE: usize = 1 << 16;

static MULAW_ENCODE_TABLE: LazyLock<Vec<u8>> = LazyLock::new(|| {
    (i16::MIN..=i16::MAX).map(mulaw::encode_sample).collect()
});

static MULAW_DECODE_TABLE: LazyLock<[i16; 256]> = LazyLock::new(|| {
    let mut table = [0i16; 256];
    for (code, entry) in table.iter_mut().enumerate() {
        *entry = mulaw::decode_sample(code as u8);
    }
    table
});

static ALAW_ENCODE_TABLE: LazyLock<Vec<u8>> = LazyLock::new(|| {
    (i16::MIN..=i16::MAX).map(alaw::encode_sample).collect()
});

static ALAW_DECODE_TABLE: LazyLock<[i16; 256]> = LazyLock::new(|| {
    let mut table = [0i16; 256];
    for (code, entry) in table.iter_mut().enumerate() {
        *entry = alaw::decode_sample(code as u8);
    }
    table
});

/// Table index of a 16-bit sample (`-32768` maps to 0)
#[inline]
fn index_of(sample: i16) -> usize {
    (sample as u16).wrapping_add(32768) as usize
}

/// Force construction of all tables
pub fn init_tables() {
    LazyLock::force(&MULAW_ENCODE_TABLE);
    LazyLock::force(&MULAW_DECODE_TABLE);
    LazyLock::force(&ALAW_ENCODE_TABLE);
    LazyLock::force(&ALAW_DECODE_TABLE);
    tracing::debug!("G.711 lookup tables initialized ({} entries per encoder)", INPUT_RANGE);
}

/// μ-law compression by table lookup
#[inline]
pub fn mulaw_compress_table(sample: i16) -> u8 {
    MULAW_ENCODE_TABLE[index_of(sample)]
}

/// μ-law expansion by table lookup
#[inline]
pub fn mulaw_expand_table(encoded: u8) -> i16 {
    MULAW_DECODE_TABLE[encoded as usize]
}

/// A-law compression by table lookup
#[inline]
pub fn alaw_compress_table(sample: i16) -> u8 {
    ALAW_ENCODE_TABLE[index_of(sample)]
}

/// A-law expansion by table lookup
#[inline]
pub fn alaw_expand_table(encoded: u8) -> i16 {
    ALAW_DECODE_TABLE[encoded as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_initialization() {
        init_tables();
        assert_eq!(MULAW_ENCODE_TABLE.len(), INPUT_RANGE);
        assert_eq!(ALAW_ENCODE_TABLE.len(), INPUT_RANGE);
        assert_eq!(MULAW_DECODE_TABLE.len(), 256);
        assert_eq!(ALAW_DECODE_TABLE.len(), 256);
    }

    #[test]
    fn test_index_of_extremes() {
        assert_eq!(index_of(i16::MIN), 0);
        assert_eq!(index_of(0), 32768);
        assert_eq!(index_of(i16::MAX), INPUT_RANGE - 1);
    }

    #[test]
    fn test_tables_match_algorithm_exhaustively() {
        for sample in i16::MIN..=i16::MAX {
            assert_eq!(
                mulaw_compress_table(sample),
                mulaw::encode_sample(sample),
                "μ-law encode mismatch for sample {}",
                sample
            );
            assert_eq!(
                alaw_compress_table(sample),
                alaw::encode_sample(sample),
                "A-law encode mismatch for sample {}",
                sample
            );
        }

        for code in 0..=255u8 {
            assert_eq!(mulaw_expand_table(code), mulaw::decode_sample(code));
            assert_eq!(alaw_expand_table(code), alaw::decode_sample(code));
        }
    }
}
