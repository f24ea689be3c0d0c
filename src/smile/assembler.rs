//! Surface assembly across expiries

use chrono::NaiveDate;

use super::SmileConfig;
use crate::core::{ChainSmile, VolSurface};

/// Can this expiry's smile support interpolation and plotting?
pub fn qualifies(smile: &ChainSmile, config: &SmileConfig) -> bool {
    smile.len() >= config.min_strikes
}

/// Collect the qualifying smiles into a surface.
///
/// Expiries with fewer than `config.min_strikes` retained strikes are left
/// out. Returns `None` when no expiry qualifies.
pub fn assemble_surface(
    underlying: &str,
    spot: f64,
    reference_date: NaiveDate,
    smiles: impl IntoIterator<Item = ChainSmile>,
    config: &SmileConfig,
) -> Option<VolSurface> {
    let slices: Vec<ChainSmile> = smiles
        .into_iter()
        .filter(|s| {
            let keep = qualifies(s, config);
            if !keep {
                tracing::debug!(
                    underlying,
                    expiry = %s.expiry,
                    strikes = s.len(),
                    "expiry excluded from surface"
                );
            }
            keep
        })
        .collect();

    if slices.is_empty() {
        return None;
    }

    Some(VolSurface::new(underlying, spot, reference_date, slices))
}
