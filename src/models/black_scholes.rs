//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing
//! - Analytic Greeks
//! - Implied volatility solver (Brent's method on a fixed volatility bracket)
//!
//! No dividend yield: the underlying is priced on spot with a flat
//! risk-free rate.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use super::brent::{brent, BrentFailure, BrentOptions};
use super::round_to;
use crate::core::{Greeks, OptionType, PricingInputs, PrismError, PrismResult};

/// Lower end of the implied volatility search bracket
pub const IV_LOWER_BOUND: f64 = 1e-6;
/// Upper end of the implied volatility search bracket (500%)
pub const IV_UPPER_BOUND: f64 = 5.0;
/// Decimal places of reported Greeks and implied vols
pub const OUTPUT_DECIMALS: i32 = 4;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    d1(spot, strike, time, rate, vol) - vol * time.sqrt()
}

/// Black-Scholes European option price
pub fn price(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> PrismResult<f64> {
    let inputs = PricingInputs::new(spot, strike, time, rate, vol, option_type)?;
    Ok(raw_price(&inputs))
}

/// Price a validated-on-entry input tuple
pub fn price_inputs(inputs: &PricingInputs) -> PrismResult<f64> {
    inputs.validate()?;
    Ok(raw_price(inputs))
}

fn raw_price(inputs: &PricingInputs) -> f64 {
    let PricingInputs {
        spot,
        strike,
        time,
        rate,
        vol,
        option_type,
    } = *inputs;

    if time <= 0.0 {
        return option_type.intrinsic(spot, strike);
    }

    let d1 = d1(spot, strike, time, rate, vol);
    let d2 = d1 - vol * time.sqrt();
    let df = (-rate * time).exp();

    let value = match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionType::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    };
    value.max(0.0)
}

/// Black-Scholes Greeks rounded to four decimals
///
/// Theta is per calendar day, vega and rho per one percentage point.
pub fn greeks(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> PrismResult<Greeks> {
    let inputs = PricingInputs::new(spot, strike, time, rate, vol, option_type)?;
    Ok(raw_greeks(&inputs).rounded(OUTPUT_DECIMALS))
}

/// Full-precision Greeks for chaining into further computation
pub fn greeks_inputs(inputs: &PricingInputs) -> PrismResult<Greeks> {
    inputs.validate()?;
    Ok(raw_greeks(inputs))
}

fn raw_greeks(inputs: &PricingInputs) -> Greeks {
    let PricingInputs {
        spot,
        strike,
        time,
        rate,
        vol,
        option_type,
    } = *inputs;

    if time <= 0.0 {
        return Greeks::new(option_type.phi(), 0.0, 0.0, 0.0, 0.0);
    }

    let sqrt_t = time.sqrt();
    let d1 = d1(spot, strike, time, rate, vol);
    let d2 = d1 - vol * sqrt_t;
    let df = (-rate * time).exp();
    let pdf_d1 = norm_pdf(d1);

    let delta = match option_type {
        OptionType::Call => norm_cdf(d1),
        OptionType::Put => norm_cdf(d1) - 1.0,
    };

    // Same for call and put
    let gamma = pdf_d1 / (spot * vol * sqrt_t);
    let vega = spot * sqrt_t * pdf_d1;

    let decay = -spot * pdf_d1 * vol / (2.0 * sqrt_t);
    let theta = match option_type {
        OptionType::Call => decay - rate * strike * df * norm_cdf(d2),
        OptionType::Put => decay + rate * strike * df * norm_cdf(-d2),
    };

    let rho = match option_type {
        OptionType::Call => strike * time * df * norm_cdf(d2),
        OptionType::Put => -strike * time * df * norm_cdf(-d2),
    };

    Greeks::new(delta, gamma, theta / 365.0, vega / 100.0, rho / 100.0)
}

/// Implied volatility from an observed option price.
///
/// Returns `Ok(None)` when no volatility in (1e-6, 5) reproduces the price,
/// which is the normal outcome for stale, crossed or arbitrage-violating
/// quotes. Only malformed spot/strike/rate inputs are errors.
pub fn implied_volatility(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    market_price: f64,
    option_type: OptionType,
) -> PrismResult<Option<f64>> {
    // Vol placeholder only; validation of spot, strike and rate is what matters here
    let inputs = PricingInputs::new(spot, strike, time, rate, IV_UPPER_BOUND, option_type)?;

    if market_price.is_nan() {
        return Err(PrismError::invalid_input("Market price is NaN"));
    }
    if market_price <= 0.0 || !market_price.is_finite() {
        return Ok(None);
    }
    if inputs.is_expired() {
        return Ok(None);
    }

    let objective = |vol: f64| raw_price(&inputs.with_vol(vol)) - market_price;

    match brent(objective, IV_LOWER_BOUND, IV_UPPER_BOUND, &BrentOptions::default()) {
        Ok(vol) => {
            let iv = round_to(vol, OUTPUT_DECIMALS);
            Ok((iv > 0.0).then_some(iv))
        }
        Err(BrentFailure::NoSignChange) => Ok(None),
        Err(reason) => {
            tracing::trace!(
                spot,
                strike,
                time,
                market_price,
                ?reason,
                "implied vol search failed"
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T30: f64 = 30.0 / 365.0;

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-10);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
    }

    #[test]
    fn test_bs_price() {
        // ATM call, 20% vol, 1 year, 5% rate
        let call_price = price(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Call).unwrap();
        assert!((call_price - 10.4506).abs() < 1e-4);

        // Put-call parity check
        let put_price = price(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Put).unwrap();
        let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
        assert!(parity.abs() < 1e-9);
    }

    #[test]
    fn test_golden_prices() {
        let call = price(100.0, 105.0, T30, 0.05, 0.2, OptionType::Call).unwrap();
        let put = price(100.0, 105.0, T30, 0.05, 0.2, OptionType::Put).unwrap();

        assert!((call - 0.730_790_6).abs() < 1e-6);
        assert!((put - 5.300_169_2).abs() < 1e-6);
    }

    #[test]
    fn test_golden_greeks() {
        let call = greeks(100.0, 105.0, T30, 0.05, 0.2, OptionType::Call).unwrap();
        assert_eq!(call, Greeks::new(0.2265, 0.0525, -0.0318, 0.0863, 0.018));

        let put = greeks(100.0, 105.0, T30, 0.05, 0.2, OptionType::Put).unwrap();
        assert_eq!(put, Greeks::new(-0.7735, 0.0525, -0.0174, 0.0863, -0.0679));
    }

    #[test]
    fn test_expired_contract() {
        assert_eq!(price(110.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call).unwrap(), 10.0);
        assert_eq!(price(110.0, 100.0, -0.1, 0.05, 0.2, OptionType::Put).unwrap(), 0.0);

        let g = greeks(90.0, 100.0, 0.0, 0.05, 0.2, OptionType::Put).unwrap();
        assert_eq!(g, Greeks::new(-1.0, 0.0, 0.0, 0.0, 0.0));
        let g = greeks(90.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call).unwrap();
        assert_eq!(g.delta, 1.0);
    }

    #[test]
    fn test_domain_errors() {
        assert!(price(-1.0, 100.0, 0.5, 0.05, 0.2, OptionType::Call).is_err());
        assert!(price(100.0, 100.0, 0.5, 0.05, 0.0, OptionType::Call).is_err());
        assert!(greeks(100.0, 0.0, 0.5, 0.05, 0.2, OptionType::Put).is_err());
        assert!(implied_volatility(100.0, 0.0, 0.5, 0.05, 3.0, OptionType::Put).is_err());
    }

    #[test]
    fn test_theta_negative_for_long_positions() {
        let call = greeks_inputs(
            &PricingInputs::new(100.0, 100.0, 0.5, 0.05, 0.25, OptionType::Call).unwrap(),
        )
        .unwrap();
        let put = greeks_inputs(
            &PricingInputs::new(100.0, 100.0, 0.5, 0.05, 0.25, OptionType::Put).unwrap(),
        )
        .unwrap();

        assert!(call.theta < 0.0);
        assert!(put.theta < 0.0);
    }

    #[test]
    fn test_implied_vol() {
        let market_price = price(100.0, 100.0, 0.5, 0.05, 0.25, OptionType::Call).unwrap();
        let iv = implied_volatility(100.0, 100.0, 0.5, 0.05, market_price, OptionType::Call)
            .unwrap()
            .unwrap();

        assert!((iv - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_iv_otm_put() {
        let market_price = price(100.0, 90.0, 0.25, 0.05, 0.30, OptionType::Put).unwrap();
        let iv = implied_volatility(100.0, 90.0, 0.25, 0.05, market_price, OptionType::Put)
            .unwrap()
            .unwrap();

        assert!((iv - 0.30).abs() < 1e-4);
    }

    #[test]
    fn test_iv_original_examples() {
        // Call at 2.50 is rich relative to the 0.73 fair value at 20% vol
        let call_iv = implied_volatility(100.0, 105.0, T30, 0.05, 2.5, OptionType::Call)
            .unwrap()
            .unwrap();
        assert!(call_iv > 0.2 && call_iv < 1.0);

        let put_iv = implied_volatility(100.0, 105.0, T30, 0.05, 7.5, OptionType::Put)
            .unwrap()
            .unwrap();
        assert!(put_iv > 0.2);
    }

    #[test]
    fn test_iv_not_found() {
        // Below intrinsic: the call is worth at least 20 - discounting
        let below = implied_volatility(120.0, 100.0, 0.5, 0.05, 15.0, OptionType::Call).unwrap();
        assert!(below.is_none());

        // Put below its discounted floor K e^{-rT} - S = 17.04
        let put_below =
            implied_volatility(100.0, 120.0, 0.5, 0.05, 15.0, OptionType::Put).unwrap();
        assert!(put_below.is_none());

        // Above spot: no volatility makes a call worth more than the stock
        let above = implied_volatility(100.0, 100.0, 0.5, 0.05, 101.0, OptionType::Call).unwrap();
        assert!(above.is_none());

        // Zero and expired quotes carry no volatility information
        assert!(implied_volatility(100.0, 100.0, 0.5, 0.05, 0.0, OptionType::Put).unwrap().is_none());
        assert!(implied_volatility(100.0, 100.0, 0.0, 0.05, 2.0, OptionType::Put).unwrap().is_none());
    }
}
