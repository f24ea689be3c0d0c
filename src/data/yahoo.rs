//! Yahoo Finance data fetcher
//!
//! Fetches spot prices, option chains and daily closes through Yahoo
//! Finance's unofficial API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::provider::{Lookback, MarketDataProvider};
use crate::core::{OptionQuote, OptionType, PrismError, PrismResult, QuoteChain};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> PrismResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a different host (proxies, test servers)
    pub fn with_base_url(base_url: impl Into<String>) -> PrismResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| PrismError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> PrismResult<T> {
        tracing::debug!(url, "yahoo request");
        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| PrismError::network(e.to_string()))?
            .json()
            .map_err(|e| PrismError::data(format!("Failed to parse response: {}", e)))
    }

    fn chart(&self, symbol: &str, lookback: Lookback) -> PrismResult<YahooChartData> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url,
            symbol,
            lookback.range()
        );

        let response: YahooChartResponse = self.get_json(&url)?;
        response
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| PrismError::data(format!("No chart data returned for {}", symbol)))
    }

    fn options(&self, symbol: &str, expiry: Option<NaiveDate>) -> PrismResult<YahooOptionChainData> {
        let mut url = format!("{}/v7/finance/options/{}", self.base_url, symbol);
        if let Some(expiry) = expiry {
            // Yahoo keys expiries by midnight UTC
            let ts = expiry
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| PrismError::invalid_input(format!("Bad expiry {}", expiry)))?
                .and_utc()
                .timestamp();
            url.push_str(&format!("?date={}", ts));
        }

        let response: YahooOptionsResponse = self.get_json(&url)?;
        response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| PrismError::data(format!("No options data returned for {}", symbol)))
    }
}

impl MarketDataProvider for YahooClient {
    fn spot_price(&self, symbol: &str) -> PrismResult<Option<f64>> {
        let chart = self.chart(symbol, Lookback::OneDay)?;
        Ok(chart
            .meta
            .regular_market_price
            .or_else(|| chart.closes().last().copied()))
    }

    fn expiries(&self, symbol: &str) -> PrismResult<Vec<NaiveDate>> {
        let data = self.options(symbol, None)?;
        Ok(data
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect())
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> PrismResult<QuoteChain> {
        let data = self.options(symbol, Some(expiry))?;
        let mut chain = QuoteChain::new(symbol, expiry);

        if let Some(options) = data.options.first() {
            let calls = options.calls.iter().map(|c| (c, OptionType::Call));
            let puts = options.puts.iter().map(|p| (p, OptionType::Put));
            for (raw, option_type) in calls.chain(puts) {
                if let Some(quote) = convert_option_quote(raw, expiry, option_type) {
                    chain.add_quote(quote);
                }
            }
        }

        Ok(chain)
    }

    fn price_history(&self, symbol: &str, lookback: Lookback) -> PrismResult<Vec<f64>> {
        Ok(self.chart(symbol, lookback)?.closes())
    }
}

/// Convert Yahoo option data to our quote format; quotes without a strike or last price are dropped
fn convert_option_quote(
    data: &YahooOptionData,
    expiry: NaiveDate,
    option_type: OptionType,
) -> Option<OptionQuote> {
    let strike = data.strike?;
    let last_price = data.last_price?;

    let mut quote = OptionQuote::new(strike, expiry, option_type, last_price);
    quote.contract_symbol = data.contract_symbol.clone();
    quote.bid = data.bid;
    quote.ask = data.ask;
    quote.volume = data.volume.and_then(|v| u64::try_from(v).ok());
    quote.open_interest = data.open_interest.and_then(|oi| u64::try_from(oi).ok());
    quote.market_implied_vol = data.implied_volatility;

    Some(quote)
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartResult,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    result: Option<Vec<YahooChartData>>,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    meta: YahooChartMeta,
    indicators: YahooIndicators,
}

impl YahooChartData {
    /// Closing prices with missing sessions removed
    fn closes(&self) -> Vec<f64> {
        self.indicators
            .quote
            .first()
            .map(|q| q.close.iter().flatten().copied().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "openInterest")]
    open_interest: Option<i64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_payload() {
        let json = r#"{
            "optionChain": {
                "result": [{
                    "expirationDates": [1750377600],
                    "options": [{
                        "calls": [
                            {"contractSymbol": "AAPL250620C00200000", "strike": 200.0, "lastPrice": 5.1,
                             "bid": 5.0, "ask": 5.2, "volume": 120, "openInterest": 3400,
                             "impliedVolatility": 0.27},
                            {"strike": 205.0}
                        ],
                        "puts": [{"strike": 195.0, "lastPrice": 3.4, "volume": -1}]
                    }]
                }]
            }
        }"#;

        let response: YahooOptionsResponse = serde_json::from_str(json).unwrap();
        let data = response.option_chain.result.into_iter().next().unwrap();
        let expiry = DateTime::from_timestamp(data.expiration_dates[0], 0)
            .unwrap()
            .date_naive();
        assert_eq!(expiry, NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());

        let options = &data.options[0];
        let call = convert_option_quote(&options.calls[0], expiry, OptionType::Call).unwrap();
        assert_eq!(call.market_implied_vol, Some(0.27));
        assert_eq!(call.open_interest, Some(3400));

        // No last price
        assert!(convert_option_quote(&options.calls[1], expiry, OptionType::Call).is_none());

        let put = convert_option_quote(&options.puts[0], expiry, OptionType::Put).unwrap();
        assert_eq!(put.volume, None);
    }

    #[test]
    fn test_parse_chart_payload() {
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {"regularMarketPrice": 101.5},
                    "timestamp": [1, 2, 3],
                    "indicators": {"quote": [{"close": [100.0, null, 101.0]}]}
                }],
                "error": null
            }
        }"#;

        let response: YahooChartResponse = serde_json::from_str(json).unwrap();
        let data = response.chart.result.unwrap().into_iter().next().unwrap();
        assert_eq!(data.closes(), vec![100.0, 101.0]);
        assert_eq!(data.meta.regular_market_price, Some(101.5));
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_spot() {
        let client = YahooClient::new().unwrap();
        let spot = client.spot_price("AAPL").unwrap();

        assert!(spot.unwrap() > 0.0);
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_option_chain() {
        let client = YahooClient::new().unwrap();
        let expiries = client.expiries("AAPL").unwrap();

        if let Some(&expiry) = expiries.first() {
            let chain = client.option_chain("AAPL", expiry).unwrap();
            println!(
                "Chain for {}: {} calls, {} puts",
                expiry,
                chain.calls.len(),
                chain.puts.len()
            );
            assert!(!chain.is_empty());
        }
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_history() {
        let client = YahooClient::new().unwrap();
        let closes = client.price_history("AAPL", Lookback::SixMonths).unwrap();
        assert!(closes.len() > 100);
    }
}
