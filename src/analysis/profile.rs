//! Greek profiles across spot

use ndarray::Array1;

use crate::core::{Greek, PricingInputs, PrismResult};
use crate::models::greeks_inputs;

/// Spot range of a profile, as multiples of the current spot
pub const PROFILE_SPOT_RANGE: (f64, f64) = (0.5, 1.3);
/// Samples per profile
pub const PROFILE_POINTS: usize = 100;

/// (spot, value) samples of one Greek with everything but spot held fixed
pub fn greek_profile(inputs: &PricingInputs, greek: Greek) -> PrismResult<Vec<(f64, f64)>> {
    let (lo, hi) = PROFILE_SPOT_RANGE;
    Array1::linspace(lo * inputs.spot, hi * inputs.spot, PROFILE_POINTS)
        .iter()
        .map(|&spot| {
            let g = greeks_inputs(&inputs.with_spot(spot))?.rounded(4);
            Ok((spot, g.get(greek)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;

    #[test]
    fn test_delta_profile_increasing_for_calls() {
        let inputs = PricingInputs::new(100.0, 100.0, 0.25, 0.05, 0.2, OptionType::Call).unwrap();
        let profile = greek_profile(&inputs, Greek::Delta).unwrap();

        assert_eq!(profile.len(), PROFILE_POINTS);
        assert!((profile[0].0 - 50.0).abs() < 1e-9);
        assert!((profile[PROFILE_POINTS - 1].0 - 130.0).abs() < 1e-9);
        assert!(profile.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn test_gamma_peaks_near_strike() {
        let inputs = PricingInputs::new(100.0, 100.0, 0.25, 0.05, 0.2, OptionType::Put).unwrap();
        let profile = greek_profile(&inputs, Greek::Gamma).unwrap();

        let (peak_spot, _) = profile
            .iter()
            .copied()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert!(peak_spot > 90.0 && peak_spot < 105.0);
    }
}
