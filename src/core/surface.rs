//! Volatility smiles and surfaces
//!
//! A smile is implied volatility as a function of strike for one expiry;
//! the surface maps each expiry to its smile. Both are assembled once from a
//! quote snapshot and then only read.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// One strike of a single-side smile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmilePoint {
    pub strike: f64,
    /// Black-Scholes implied vol; `None` when the inversion failed
    pub implied_vol: Option<f64>,
    /// Implied vol reported by the provider, if any
    pub market_implied_vol: Option<f64>,
}

/// Single-side smile for one (underlying, expiry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Smile {
    pub underlying: String,
    pub expiry: NaiveDate,
    pub option_type: OptionType,
    pub points: Vec<SmilePoint>,
}

impl Smile {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn strikes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.strike).collect()
    }

    pub fn implied_vols(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.implied_vol).collect()
    }

    pub fn market_implied_vols(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.market_implied_vol).collect()
    }

    /// Point at the strike nearest to `strike`
    pub fn nearest(&self, strike: f64) -> Option<&SmilePoint> {
        self.points
            .iter()
            .min_by(|a, b| (a.strike - strike).abs().total_cmp(&(b.strike - strike).abs()))
    }
}

/// Both sides of the smile for one expiry, as parallel sequences.
///
/// Every retained strike has at least one side with a positive implied vol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSmile {
    pub expiry: NaiveDate,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    pub strikes: Vec<f64>,
    pub call_ivs: Vec<Option<f64>>,
    pub put_ivs: Vec<Option<f64>>,
}

impl ChainSmile {
    pub fn empty(expiry: NaiveDate, time_to_expiry: f64) -> Self {
        Self {
            expiry,
            time_to_expiry,
            strikes: Vec::new(),
            call_ivs: Vec::new(),
            put_ivs: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, strike: f64, call_iv: Option<f64>, put_iv: Option<f64>) {
        self.strikes.push(strike);
        self.call_ivs.push(call_iv);
        self.put_ivs.push(put_iv);
    }

    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    /// Implied vols of one side, parallel to `strikes`
    pub fn ivs(&self, option_type: OptionType) -> &[Option<f64>] {
        match option_type {
            OptionType::Call => &self.call_ivs,
            OptionType::Put => &self.put_ivs,
        }
    }

    /// (strike, iv) pairs of one side, skipping strikes where that side failed
    pub fn valid_points(&self, option_type: OptionType) -> Vec<(f64, f64)> {
        self.strikes
            .iter()
            .zip(self.ivs(option_type))
            .filter_map(|(&k, iv)| iv.map(|v| (k, v)))
            .collect()
    }
}

/// One scatter point of the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub strike: f64,
    pub time_to_expiry: f64,
    pub implied_vol: f64,
}

/// Implied volatility surface: expiry -> smile (both sides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolSurface {
    /// Underlying symbol
    pub underlying: String,
    /// Reference spot price
    pub spot: f64,
    /// Reference date
    pub reference_date: NaiveDate,
    slices: BTreeMap<NaiveDate, ChainSmile>,
}

impl VolSurface {
    pub fn new(
        underlying: impl Into<String>,
        spot: f64,
        reference_date: NaiveDate,
        slices: impl IntoIterator<Item = ChainSmile>,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            spot,
            reference_date,
            slices: slices.into_iter().map(|s| (s.expiry, s)).collect(),
        }
    }

    /// Expiries in ascending order
    pub fn expiries(&self) -> Vec<NaiveDate> {
        self.slices.keys().copied().collect()
    }

    pub fn slice(&self, expiry: NaiveDate) -> Option<&ChainSmile> {
        self.slices.get(&expiry)
    }

    pub fn slices(&self) -> impl Iterator<Item = &ChainSmile> {
        self.slices.values()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Flatten one side into (strike, T, iv) points, skipping failed inversions
    pub fn points(&self, option_type: OptionType) -> Vec<SurfacePoint> {
        self.slices
            .values()
            .flat_map(|slice| {
                slice
                    .valid_points(option_type)
                    .into_iter()
                    .map(move |(strike, iv)| SurfacePoint {
                        strike,
                        time_to_expiry: slice.time_to_expiry,
                        implied_vol: iv,
                    })
            })
            .collect()
    }

    /// (T, iv) at the valid strike closest to spot, per expiry
    pub fn atm_term_structure(&self, option_type: OptionType) -> Vec<(f64, f64)> {
        self.slices
            .values()
            .filter_map(|slice| {
                slice
                    .valid_points(option_type)
                    .into_iter()
                    .min_by(|a, b| (a.0 - self.spot).abs().total_cmp(&(b.0 - self.spot).abs()))
                    .map(|(_, iv)| (slice.time_to_expiry, iv))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(month: u32, t: f64) -> ChainSmile {
        let mut s = ChainSmile::empty(NaiveDate::from_ymd_opt(2025, month, 20).unwrap(), t);
        s.push(95.0, Some(0.22), Some(0.24));
        s.push(100.0, Some(0.20), None);
        s.push(105.0, None, Some(0.19));
        s
    }

    #[test]
    fn test_surface_ordering_and_points() {
        let surface = VolSurface::new(
            "TEST",
            100.0,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            vec![slice(6, 0.46), slice(3, 0.21)],
        );

        let expiries = surface.expiries();
        assert_eq!(expiries.len(), 2);
        assert!(expiries[0] < expiries[1]);

        // Two valid calls per slice, the 105 call failed
        assert_eq!(surface.points(OptionType::Call).len(), 4);
        assert_eq!(surface.points(OptionType::Put).len(), 4);
    }

    #[test]
    fn test_atm_term_structure() {
        let surface = VolSurface::new(
            "TEST",
            100.0,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            vec![slice(3, 0.21)],
        );

        let calls = surface.atm_term_structure(OptionType::Call);
        assert_eq!(calls, vec![(0.21, 0.20)]);

        // The 100 put is missing, so 95 and 105 tie on distance; first wins
        let puts = surface.atm_term_structure(OptionType::Put);
        assert_eq!(puts.len(), 1);
    }

    #[test]
    fn test_smile_nearest() {
        let smile = Smile {
            underlying: "TEST".into(),
            expiry: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            option_type: OptionType::Call,
            points: vec![
                SmilePoint { strike: 90.0, implied_vol: Some(0.3), market_implied_vol: None },
                SmilePoint { strike: 110.0, implied_vol: None, market_implied_vol: Some(0.25) },
            ],
        };

        assert_eq!(smile.nearest(108.0).unwrap().strike, 110.0);
        assert_eq!(smile.implied_vols(), vec![Some(0.3), None]);
    }
}
