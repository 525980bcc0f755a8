//! Shared helpers: input validation and linear PCM byte packing

pub mod pcm;
pub mod validation;

pub use pcm::{pack, unpack};
