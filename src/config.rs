//! Top-level configuration

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::HeatmapConfig;
use crate::core::PrismResult;
use crate::data::{CacheConfig, Lookback};
use crate::smile::SmileConfig;

/// Risk-free rates offered for selection: 0% to 15% in 25bp steps
pub fn risk_free_rate_choices() -> Vec<f64> {
    (0..=60).map(|i| f64::from(i) * 25.0 / 10_000.0).collect()
}

/// History windows for the two uses of realized volatility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Window for the reported historical volatility
    /// Default: 6 months
    pub volatility_lookback: Lookback,

    /// Window used when historical vol stands in for a missing implied vol
    /// Default: 1 year
    pub fallback_lookback: Lookback,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            volatility_lookback: Lookback::SixMonths,
            fallback_lookback: Lookback::OneYear,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    /// Default annual risk-free rate
    /// Default: 0.05
    pub risk_free_rate: f64,
    pub smile: SmileConfig,
    pub history: HistoryConfig,
    pub cache: CacheConfig,
    pub heatmap: HeatmapConfig,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            smile: SmileConfig::default(),
            history: HistoryConfig::default(),
            cache: CacheConfig::default(),
            heatmap: HeatmapConfig::default(),
        }
    }
}

impl PrismConfig {
    /// Load from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> PrismResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
