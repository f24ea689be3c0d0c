//! Historical (realized) volatility from closing prices

use statrs::statistics::Statistics;

use super::round_to;

/// Trading days per year used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Log returns ln(P_i / P_{i-1}) of consecutive prices
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Annualized volatility of daily log returns, rounded to four decimals.
///
/// Uses the population standard deviation of the returns. Returns `None`
/// when fewer than two prices are given or any price is not strictly
/// positive, so "not enough history" is never confused with zero volatility.
pub fn historical_volatility(prices: &[f64]) -> Option<f64> {
    if prices.len() < 2 {
        return None;
    }
    if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
        return None;
    }

    let returns = log_returns(prices);
    let daily = returns.iter().population_std_dev();
    Some(round_to(daily * TRADING_DAYS_PER_YEAR.sqrt(), 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_prices() {
        assert_eq!(historical_volatility(&[100.0, 100.0, 100.0, 100.0]), Some(0.0));
    }

    #[test]
    fn test_known_series() {
        let prices = [100.0, 101.0, 102.0, 103.0, 99.0, 98.0, 105.0];
        assert_eq!(historical_volatility(&prices), Some(0.5155));

        let prices = [100.0, 102.0, 101.0, 103.0];
        assert_eq!(historical_volatility(&prices), Some(0.2212));
    }

    #[test]
    fn test_insufficient_history() {
        assert_eq!(historical_volatility(&[]), None);
        assert_eq!(historical_volatility(&[100.0]), None);
        assert_eq!(historical_volatility(&[100.0, 0.0, 101.0]), None);
    }

    #[test]
    fn test_log_returns() {
        let r = log_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 1.1_f64.ln()).abs() < 1e-12);
        assert!((r[1] - 0.9_f64.ln()).abs() < 1e-12);
    }
}
