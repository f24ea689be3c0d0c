//! Market snapshot for a single contract

use serde::{Deserialize, Serialize};

/// Where the volatility fed to the pricer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolSource {
    /// Inverted from the contract's last traded price
    Implied,
    /// Realized volatility of the underlying
    Historical,
}

/// Inputs needed to price one listed contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub spot: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Realized volatility, if enough history was available
    pub historical_vol: Option<f64>,
    /// Implied volatility after fallback
    pub implied_vol: f64,
    /// Source of `implied_vol`
    pub implied_source: VolSource,
}

/// Prefer the contract's implied vol, fall back to historical
pub fn select_volatility(implied: Option<f64>, historical: Option<f64>) -> Option<(f64, VolSource)> {
    implied
        .map(|v| (v, VolSource::Implied))
        .or_else(|| historical.map(|v| (v, VolSource::Historical)))
}
