//! Market data provider seam
//!
//! Everything the engine needs from the outside world: spot, listed
//! expiries, per-expiry option chains and daily closing prices.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{PrismResult, QuoteChain};

/// History window requested from a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lookback {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Lookback {
    /// Range token understood by Yahoo's chart endpoint
    pub fn range(&self) -> &'static str {
        match self {
            Lookback::OneDay => "1d",
            Lookback::FiveDays => "5d",
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
            Lookback::FiveYears => "5y",
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.range())
    }
}

/// Source of spot prices, option chains and price history
pub trait MarketDataProvider {
    /// Latest price of the underlying, `None` if the provider has none
    fn spot_price(&self, symbol: &str) -> PrismResult<Option<f64>>;

    /// Listed option expiries
    fn expiries(&self, symbol: &str) -> PrismResult<Vec<NaiveDate>>;

    /// All call and put quotes for one expiry
    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> PrismResult<QuoteChain>;

    /// Daily closes, oldest first
    fn price_history(&self, symbol: &str, lookback: Lookback) -> PrismResult<Vec<f64>>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for &P {
    fn spot_price(&self, symbol: &str) -> PrismResult<Option<f64>> {
        (**self).spot_price(symbol)
    }

    fn expiries(&self, symbol: &str) -> PrismResult<Vec<NaiveDate>> {
        (**self).expiries(symbol)
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> PrismResult<QuoteChain> {
        (**self).option_chain(symbol, expiry)
    }

    fn price_history(&self, symbol: &str, lookback: Lookback) -> PrismResult<Vec<f64>> {
        (**self).price_history(symbol, lookback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookback_tokens() {
        assert_eq!(Lookback::SixMonths.range(), "6mo");
        assert_eq!(Lookback::OneYear.to_string(), "1y");

        let parsed: Lookback = serde_json::from_str("\"6mo\"").unwrap();
        assert_eq!(parsed, Lookback::SixMonths);
    }
}
