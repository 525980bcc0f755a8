//! G.711 companding laws
//!
//! Per-sample algorithmic implementations live in [`alaw`] and [`mulaw`];
//! [`tables`] holds full-range lookup tables generated from them, which the
//! batch paths use.

pub mod alaw;
pub mod mulaw;
pub mod tables;

pub use tables::init_tables;

#[cfg(test)]
mod tests;
