//! Price and P&L heatmaps
//!
//! Black-Scholes prices over a strike x time grid around the selected
//! contract. The strike band is one-sided: at and above spot for calls, at
//! and below spot for puts. This is a display band and is independent of the
//! smile moneyness filter.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::core::{OptionType, PricingInputs, PrismError, PrismResult};
use crate::models::price_inputs;

/// Shortest maturity on the time axis (one day)
pub const MIN_HEATMAP_TIME: f64 = 1.0 / 365.0;

/// Heatmap grid resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Points per axis
    /// Default: 10
    pub points: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self { points: 10 }
    }
}

/// Strike range of the heatmap for a side
pub fn heatmap_strike_band(spot: f64, option_type: OptionType) -> (f64, f64) {
    match option_type {
        OptionType::Call => (spot, 1.5 * spot),
        OptionType::Put => (0.5 * spot, spot),
    }
}

/// Prices on a [time, strike] grid plus the reference contract price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHeatmap {
    pub option_type: OptionType,
    pub strikes: Array1<f64>,
    pub times: Array1<f64>,
    /// prices[[i, j]] is the price at times[i], strikes[j]
    pub prices: Array2<f64>,
    /// Price of the selected contract
    pub reference_price: f64,
}

impl PriceHeatmap {
    /// Profit/loss of buying the selected contract, for every grid cell
    pub fn pnl(&self) -> Array2<f64> {
        &self.prices - self.reference_price
    }

    /// Largest absolute P&L, for a symmetric color scale
    pub fn max_abs_pnl(&self) -> f64 {
        self.pnl().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

/// Build the price heatmap around `inputs` (spot, rate, vol and side are held fixed)
pub fn price_heatmap(inputs: &PricingInputs, config: &HeatmapConfig) -> PrismResult<PriceHeatmap> {
    if config.points < 2 {
        return Err(PrismError::invalid_input("Heatmap needs at least 2 points per axis"));
    }
    let reference_price = price_inputs(inputs)?;

    let (lower, upper) = heatmap_strike_band(inputs.spot, inputs.option_type);
    let strikes = Array1::linspace(lower, upper, config.points);
    let times = Array1::linspace(MIN_HEATMAP_TIME, inputs.time, config.points);

    let mut prices = Array2::zeros((times.len(), strikes.len()));
    for ((i, j), cell) in prices.indexed_iter_mut() {
        let point = PricingInputs {
            strike: strikes[j],
            time: times[i],
            ..*inputs
        };
        *cell = price_inputs(&point)?;
    }

    Ok(PriceHeatmap {
        option_type: inputs.option_type,
        strikes,
        times,
        prices,
        reference_price,
    })
}
