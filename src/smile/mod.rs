//! Smile and Surface Construction
//!
//! Two-stage pipeline over a quote snapshot:
//! 1. **Chain normalization**: moneyness band, per-side implied vol,
//!    drop strikes with no usable signal
//! 2. **Surface assembly**: keep expiries with enough strikes, index by expiry

mod assembler;
mod builder;
mod config;

pub use assembler::*;
pub use builder::*;
pub use config::*;
