//! Option quote data
//!
//! Market quotes for a single expiry as delivered by a market-data provider.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// Strikes closer than this are treated as the same strike
pub const STRIKE_TOLERANCE: f64 = 0.01;

/// Option market quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Contract symbol (exchange-specific)
    pub contract_symbol: Option<String>,
    /// Strike price
    pub strike: f64,
    /// Expiration date
    pub expiry: NaiveDate,
    /// Call or put
    pub option_type: OptionType,
    /// Last traded price
    pub last_price: f64,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Trading volume
    pub volume: Option<u64>,
    /// Open interest
    pub open_interest: Option<u64>,
    /// Implied volatility reported by the provider
    pub market_implied_vol: Option<f64>,
}

impl OptionQuote {
    pub fn new(strike: f64, expiry: NaiveDate, option_type: OptionType, last_price: f64) -> Self {
        Self {
            contract_symbol: None,
            strike,
            expiry,
            option_type,
            last_price,
            bid: None,
            ask: None,
            volume: None,
            open_interest: None,
            market_implied_vol: None,
        }
    }

    pub fn with_market_iv(mut self, iv: f64) -> Self {
        self.market_implied_vol = Some(iv);
        self
    }
}

/// Chain of quotes for a single expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteChain {
    /// Underlying symbol
    pub underlying: String,
    /// Expiry date
    pub expiry: NaiveDate,
    /// Call quotes, sorted by strike
    pub calls: Vec<OptionQuote>,
    /// Put quotes, sorted by strike
    pub puts: Vec<OptionQuote>,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl QuoteChain {
    pub fn new(underlying: impl Into<String>, expiry: NaiveDate) -> Self {
        Self {
            underlying: underlying.into(),
            expiry,
            calls: Vec::new(),
            puts: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Add a quote to the side it belongs to
    pub fn add_quote(&mut self, quote: OptionQuote) {
        let side = match quote.option_type {
            OptionType::Call => &mut self.calls,
            OptionType::Put => &mut self.puts,
        };
        side.push(quote);
        side.sort_by(|a, b| a.strike.total_cmp(&b.strike));
    }

    /// Quotes of one side
    pub fn side(&self, option_type: OptionType) -> &[OptionQuote] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    /// Union of call and put strikes, sorted and de-duplicated
    pub fn strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self
            .calls
            .iter()
            .map(|q| q.strike)
            .chain(self.puts.iter().map(|q| q.strike))
            .collect();
        strikes.sort_by(|a, b| a.total_cmp(b));
        strikes.dedup_by(|a, b| (*a - *b).abs() < STRIKE_TOLERANCE);
        strikes
    }

    /// First quote of a side at strike
    pub fn quote_at(&self, strike: f64, option_type: OptionType) -> Option<&OptionQuote> {
        self.side(option_type)
            .iter()
            .find(|q| (q.strike - strike).abs() < STRIKE_TOLERANCE)
    }

    /// Get call quote at strike
    pub fn call_at(&self, strike: f64) -> Option<&OptionQuote> {
        self.quote_at(strike, OptionType::Call)
    }

    /// Get put quote at strike
    pub fn put_at(&self, strike: f64) -> Option<&OptionQuote> {
        self.quote_at(strike, OptionType::Put)
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
    }

    #[test]
    fn test_strike_union() {
        let mut chain = QuoteChain::new("AAPL", expiry());
        chain.add_quote(OptionQuote::new(110.0, expiry(), OptionType::Call, 1.2));
        chain.add_quote(OptionQuote::new(100.0, expiry(), OptionType::Call, 5.0));
        chain.add_quote(OptionQuote::new(100.0, expiry(), OptionType::Put, 4.1));
        chain.add_quote(OptionQuote::new(90.0, expiry(), OptionType::Put, 1.0));

        assert_eq!(chain.strikes(), vec![90.0, 100.0, 110.0]);
        assert_eq!(chain.calls[0].strike, 100.0);
    }

    #[test]
    fn test_quote_lookup() {
        let mut chain = QuoteChain::new("AAPL", expiry());
        chain.add_quote(OptionQuote::new(100.0, expiry(), OptionType::Call, 5.0));

        assert!(chain.call_at(100.0).is_some());
        assert!(chain.put_at(100.0).is_none());
        assert!(chain.call_at(100.5).is_none());
    }
}
