//! Scenario analysis around a selected contract
//!
//! - Price and P&L heatmaps over strike and time
//! - Greek profiles across spot
//! - Market snapshot with implied -> historical volatility fallback

pub mod heatmap;
pub mod profile;
pub mod snapshot;

pub use heatmap::*;
pub use profile::*;
pub use snapshot::*;
