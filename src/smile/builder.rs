//! Option-chain normalization into smiles
//!
//! Turns the raw call/put quotes of one expiry into per-strike implied
//! volatilities, keeping only strikes inside the moneyness band that carry a
//! usable signal on at least one side.

use super::SmileConfig;
use crate::core::{
    ChainSmile, OptionType, PrismError, PrismResult, QuoteChain, Smile, SmilePoint,
};
use crate::models::implied_volatility;

/// Implied vol of one side at one strike, if a quote exists and inverts
fn side_iv(
    chain: &QuoteChain,
    strike: f64,
    spot: f64,
    time: f64,
    rate: f64,
    option_type: OptionType,
) -> Option<f64> {
    let quote = chain.quote_at(strike, option_type)?;

    match implied_volatility(spot, strike, time, rate, quote.last_price, option_type) {
        Ok(iv) => iv,
        Err(e) => {
            tracing::debug!(
                underlying = %chain.underlying,
                expiry = %chain.expiry,
                strike,
                side = %option_type,
                "skipping quote: {}",
                e
            );
            None
        }
    }
}

/// Build both sides of the smile for one expiry.
///
/// A strike is kept when the call or put implied vol is strictly positive;
/// the missing side is then `None`. An empty result means the chain had no
/// usable strike, not that something failed.
pub fn build_chain_smile(
    chain: &QuoteChain,
    spot: f64,
    time_to_expiry: f64,
    rate: f64,
    config: &SmileConfig,
) -> PrismResult<ChainSmile> {
    if !spot.is_finite() || spot <= 0.0 {
        return Err(PrismError::invalid_input(format!(
            "Spot must be positive, got {}",
            spot
        )));
    }
    if !rate.is_finite() || time_to_expiry.is_nan() {
        return Err(PrismError::invalid_input("Rate and time must be finite"));
    }

    let mut smile = ChainSmile::empty(chain.expiry, time_to_expiry);
    let mut dropped = 0usize;

    for strike in chain
        .strikes()
        .into_iter()
        .filter(|&k| config.in_band(k, spot))
    {
        let call_iv = side_iv(chain, strike, spot, time_to_expiry, rate, OptionType::Call);
        let put_iv = side_iv(chain, strike, spot, time_to_expiry, rate, OptionType::Put);

        let usable = |iv: Option<f64>| iv.is_some_and(|v| v > 0.0);
        if usable(call_iv) || usable(put_iv) {
            smile.push(strike, call_iv, put_iv);
        } else {
            dropped += 1;
        }
    }

    tracing::debug!(
        underlying = %chain.underlying,
        expiry = %chain.expiry,
        kept = smile.len(),
        dropped,
        "built chain smile"
    );

    Ok(smile)
}

/// Single-side smile with the provider's implied vols alongside the model's
pub fn build_side_smile(
    chain: &QuoteChain,
    spot: f64,
    time_to_expiry: f64,
    rate: f64,
    option_type: OptionType,
    config: &SmileConfig,
) -> PrismResult<Smile> {
    let chain_smile = build_chain_smile(chain, spot, time_to_expiry, rate, config)?;
    Ok(side_smile(chain, &chain_smile, option_type))
}

/// Project an already-built chain smile onto one side
pub fn side_smile(chain: &QuoteChain, chain_smile: &ChainSmile, option_type: OptionType) -> Smile {
    let points = chain_smile
        .strikes
        .iter()
        .zip(chain_smile.ivs(option_type))
        .map(|(&strike, &implied_vol)| SmilePoint {
            strike,
            implied_vol,
            market_implied_vol: chain
                .quote_at(strike, option_type)
                .and_then(|q| q.market_implied_vol),
        })
        .collect();

    Smile {
        underlying: chain.underlying.clone(),
        expiry: chain.expiry,
        option_type,
        points,
    }
}
