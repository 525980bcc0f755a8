//! # xlaw-core: Companding, Requantization and Loudness
//!
//! Sample-level transforms for telephony and general PCM audio.
//!
//! ## Features
//!
//! - **G.711 (PCMU/PCMA)**: μ-law and A-law companding with full-range lookup tables
//! - **Bit-depth requantization**: triangular dither with error-feedback noise shaping
//! - **Loudness**: K-weighted, 400 ms block-gated integrated loudness and RMS level
//! - **PCM packing**: little-endian signed byte layout for 8/16/24/32-bit samples
//!
//! ## Performance
//!
//! - **Lookup Tables**: Pre-computed tables for O(1) companding
//! - **Parallel Processing**: Long codec batches and loudness blocks run on rayon
//!
//! ## Usage
//!
//! ```rust
//! use xlaw_core::{BitDepth, CodecConfig, CompandingCodec};
//!
//! // A μ-law codec fed with 24-bit samples
//! let config = CodecConfig::mulaw()
//!     .with_bit_depth(BitDepth::Bits24)
//!     .with_dither_seed(7);
//! let mut codec = CompandingCodec::new(config)?;
//!
//! let samples = vec![0i32; 160];
//! let encoded = codec.encode(&samples)?;
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded.len(), 160);
//! # Ok::<(), xlaw_core::XlawError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod codecs;
pub mod error;
pub mod loudness;
pub mod requantize;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use codecs::CompandingCodec;
pub use error::{ErrorCategory, Result, XlawError};
pub use loudness::{
    integrated_loudness, rms_db, LoudnessConfig, LoudnessMeasurement, LoudnessMeter, LoudnessMode,
};
pub use requantize::{
    requantize_sample, DitherSource, EqualDepthPolicy, Requantized, Requantizer,
    RequantizerConfig, TpdfDither,
};
pub use types::{BitDepth, CodecConfig, CodecInfo, Compander, Law, SampleRate};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported companding laws
pub const SUPPORTED_LAWS: &[&str] = &["PCMU", "PCMA"];

/// Initialize the library
///
/// Installs a `tracing` subscriber honouring `RUST_LOG` if none is set yet
/// and builds the companding lookup tables. Safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for fallible setup.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    codecs::g711::init_tables();

    tracing::info!("xlaw-core v{} initialized", VERSION);
    tracing::info!("Supported laws: {:?}", SUPPORTED_LAWS);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_laws: SUPPORTED_LAWS.to_vec(),
        supported_bit_depths: BitDepth::SUPPORTED.to_vec(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Names of the supported companding laws
    pub supported_laws: Vec<&'static str>,
    /// Bit depths accepted by every operation
    pub supported_bit_depths: Vec<BitDepth>,
}
