//! Configuration for smile and surface construction

use serde::{Deserialize, Serialize};

/// Moneyness band and size rules applied when building smiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmileConfig {
    /// Lowest strike kept, as a multiple of spot (inclusive)
    /// Default: 0.5
    pub min_moneyness: f64,

    /// Highest strike kept, as a multiple of spot (inclusive)
    /// Default: 1.5
    pub max_moneyness: f64,

    /// Minimum number of retained strikes for an expiry to enter the surface
    /// Default: 2
    pub min_strikes: usize,
}

impl Default for SmileConfig {
    fn default() -> Self {
        Self {
            min_moneyness: 0.5,
            max_moneyness: 1.5,
            min_strikes: 2,
        }
    }
}

impl SmileConfig {
    /// Strike band [lower, upper] for a given spot
    pub fn band(&self, spot: f64) -> (f64, f64) {
        (self.min_moneyness * spot, self.max_moneyness * spot)
    }

    /// Is the strike inside the moneyness band (bounds inclusive)?
    pub fn in_band(&self, strike: f64, spot: f64) -> bool {
        let (lower, upper) = self.band(spot);
        strike >= lower && strike <= upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        let config = SmileConfig::default();

        assert!(config.in_band(50.0, 100.0));
        assert!(config.in_band(150.0, 100.0));
        assert!(!config.in_band(49.99, 100.0));
        assert!(!config.in_band(151.0, 100.0));
    }

    #[test]
    fn test_partial_json() {
        let config: SmileConfig = serde_json::from_str(r#"{"min_strikes": 3}"#).unwrap();
        assert_eq!(config.min_strikes, 3);
        assert_eq!(config.max_moneyness, 1.5);
    }
}
