//! Pricing and volatility models
//!
//! Implements:
//! - Black-Scholes (pricing, Greeks, implied volatility)
//! - Brent root finder used by the implied volatility solver
//! - Historical volatility from closing prices

pub mod black_scholes;
pub mod brent;
pub mod historical;

pub use black_scholes::*;
pub use brent::*;
pub use historical::*;

/// Round to a fixed number of decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
