//! Volatility engine
//!
//! Wires a [`MarketDataProvider`] into the pure pricing and smile code. The
//! engine holds no mutable state; put a [`CachedProvider`] underneath it to
//! avoid refetching.
//!
//! [`CachedProvider`]: crate::data::CachedProvider

use chrono::{NaiveDate, Utc};

use crate::analysis::{select_volatility, MarketSnapshot};
use crate::config::PrismConfig;
use crate::core::{
    year_fraction, ChainSmile, OptionType, PrismError, PrismResult, Smile, VolSurface,
};
use crate::data::{Lookback, MarketDataProvider};
use crate::models::{historical_volatility, implied_volatility};
use crate::smile::{assemble_surface, build_chain_smile, side_smile};

pub struct VolEngine<P> {
    provider: P,
    config: PrismConfig,
    reference_date: Option<NaiveDate>,
}

impl<P: MarketDataProvider> VolEngine<P> {
    pub fn new(provider: P, config: PrismConfig) -> Self {
        Self {
            provider,
            config,
            reference_date: None,
        }
    }

    /// Pin "today" instead of reading the clock
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn config(&self) -> &PrismConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Years from the reference date to `expiry`
    pub fn time_to_expiry(&self, expiry: NaiveDate) -> f64 {
        year_fraction(expiry, self.reference_date())
    }

    /// Current spot; a provider with no price is a data error here
    pub fn spot(&self, symbol: &str) -> PrismResult<f64> {
        match self.provider.spot_price(symbol)? {
            Some(spot) if spot.is_finite() && spot > 0.0 => Ok(spot),
            Some(spot) => Err(PrismError::data(format!(
                "Invalid spot {} for {}",
                spot, symbol
            ))),
            None => Err(PrismError::data(format!("No spot price for {}", symbol))),
        }
    }

    /// Listed expiries strictly after the reference date, ascending
    pub fn expiries(&self, symbol: &str) -> PrismResult<Vec<NaiveDate>> {
        let today = self.reference_date();
        let mut expiries: Vec<NaiveDate> = self
            .provider
            .expiries(symbol)?
            .into_iter()
            .filter(|&e| e > today)
            .collect();
        expiries.sort();
        expiries.dedup();
        Ok(expiries)
    }

    fn chain_smile_with_spot(
        &self,
        symbol: &str,
        spot: f64,
        expiry: NaiveDate,
        rate: f64,
    ) -> PrismResult<ChainSmile> {
        let chain = self.provider.option_chain(symbol, expiry)?;
        build_chain_smile(&chain, spot, self.time_to_expiry(expiry), rate, &self.config.smile)
    }

    /// Both sides of the smile for one expiry
    pub fn chain_smile(&self, symbol: &str, expiry: NaiveDate, rate: f64) -> PrismResult<ChainSmile> {
        let spot = self.spot(symbol)?;
        self.chain_smile_with_spot(symbol, spot, expiry, rate)
    }

    /// Single-side smile with model and provider implied vols per strike
    pub fn build_smile(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        option_type: OptionType,
        rate: f64,
    ) -> PrismResult<Smile> {
        let spot = self.spot(symbol)?;
        let chain = self.provider.option_chain(symbol, expiry)?;
        let chain_smile =
            build_chain_smile(&chain, spot, self.time_to_expiry(expiry), rate, &self.config.smile)?;
        Ok(side_smile(&chain, &chain_smile, option_type))
    }

    /// Surface at the configured risk-free rate
    pub fn build_surface(&self, symbol: &str) -> PrismResult<Option<VolSurface>> {
        self.build_surface_at_rate(symbol, self.config.risk_free_rate)
    }

    /// Surface over every future expiry that yields enough strikes.
    ///
    /// An expiry whose chain cannot be fetched is skipped with a warning.
    pub fn build_surface_at_rate(&self, symbol: &str, rate: f64) -> PrismResult<Option<VolSurface>> {
        let expiries = self.expiries(symbol)?;
        if expiries.is_empty() {
            tracing::info!(symbol, "no option expiries");
            return Ok(None);
        }

        let spot = self.spot(symbol)?;
        let mut smiles = Vec::with_capacity(expiries.len());
        for expiry in expiries {
            match self.chain_smile_with_spot(symbol, spot, expiry, rate) {
                Ok(smile) => smiles.push(smile),
                Err(e) => tracing::warn!("Failed to build smile for {} {}: {}", symbol, expiry, e),
            }
        }

        let surface = assemble_surface(
            symbol,
            spot,
            self.reference_date(),
            smiles,
            &self.config.smile,
        );
        tracing::debug!(
            symbol,
            expiries = surface.as_ref().map_or(0, |s| s.len()),
            "assembled surface"
        );
        Ok(surface)
    }

    /// Realized volatility over the configured window
    pub fn historical_volatility(&self, symbol: &str) -> PrismResult<Option<f64>> {
        self.historical_volatility_over(symbol, self.config.history.volatility_lookback)
    }

    /// Realized volatility over an explicit window
    pub fn historical_volatility_over(&self, symbol: &str, lookback: Lookback) -> PrismResult<Option<f64>> {
        let closes = self.provider.price_history(symbol, lookback)?;
        Ok(historical_volatility(&closes))
    }

    /// Spot, time to expiry and volatilities for pricing one listed contract.
    ///
    /// The implied vol falls back to one-year historical vol when the
    /// contract has no quote or its price does not invert. `None` when
    /// neither volatility is available.
    pub fn market_snapshot(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        strike: f64,
        rate: f64,
        option_type: OptionType,
    ) -> PrismResult<Option<MarketSnapshot>> {
        let spot = self.spot(symbol)?;
        let chain = self.provider.option_chain(symbol, expiry)?;
        let time = self.time_to_expiry(expiry);

        let historical =
            self.historical_volatility_over(symbol, self.config.history.fallback_lookback)?;

        let implied = match chain.quote_at(strike, option_type) {
            Some(quote) => implied_volatility(spot, strike, time, rate, quote.last_price, option_type)?,
            None => None,
        };

        let Some((vol, source)) = select_volatility(implied, historical) else {
            tracing::warn!(symbol, %expiry, strike, "no implied or historical volatility");
            return Ok(None);
        };

        Ok(Some(MarketSnapshot {
            spot,
            time_to_expiry: time,
            historical_vol: historical,
            implied_vol: vol,
            implied_source: source,
        }))
    }
}
