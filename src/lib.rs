//! # Prismetrics - Option Pricing and Implied Volatility
//!
//! Black-Scholes pricing, Greeks and implied volatility for listed equity
//! options, plus reconstruction of the implied volatility smile and surface
//! from a noisy option chain.
//!
//! ## Key Components
//!
//! - **Black-Scholes**: European prices and analytic Greeks
//! - **Implied Vol**: Brent root finding on the (1e-6, 5) volatility bracket
//! - **Historical Vol**: annualized volatility of daily log returns
//! - **Smile Builder**: moneyness filter and per-strike, per-side implied vols
//! - **Surface**: smiles across expiries, keyed by expiry
//! - **Data**: Yahoo Finance provider with an optional on-disk cache
//!
//! ## Usage
//!
//! ```rust,no_run
//! use prismetrics::prelude::*;
//!
//! let provider = CachedProvider::new(YahooClient::new().unwrap(), CacheConfig::default()).unwrap();
//! let engine = VolEngine::new(provider, PrismConfig::default());
//!
//! if let Some(surface) = engine.build_surface("AAPL").unwrap() {
//!     for expiry in surface.expiries() {
//!         println!("{}: {} strikes", expiry, surface.slice(expiry).unwrap().len());
//!     }
//! }
//!
//! let call = bs_price(100.0, 105.0, 30.0 / 365.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let iv = implied_volatility(100.0, 105.0, 30.0 / 365.0, 0.05, call, OptionType::Call).unwrap();
//! assert!(iv.is_some());
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Price American early exercise
//! - Fit local or stochastic volatility models
//! - Stream or persist surfaces

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod engine;
pub mod models;
pub mod smile;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        year_fraction, ChainSmile, Greek, Greeks, OptionQuote, OptionType, PricingInputs,
        PrismError, PrismResult, QuoteChain, Smile, SmilePoint, SurfacePoint, VolSurface,
    };

    // Models
    pub use crate::models::{
        greeks as bs_greeks, greeks_inputs, historical_volatility, implied_volatility, norm_cdf,
        norm_pdf, price as bs_price, price_inputs,
    };

    // Smile and surface
    pub use crate::smile::{assemble_surface, build_chain_smile, build_side_smile, SmileConfig};

    // Analysis
    pub use crate::analysis::{
        greek_profile, price_heatmap, HeatmapConfig, MarketSnapshot, PriceHeatmap, VolSource,
    };

    // Data
    pub use crate::data::{
        CacheConfig, CachedProvider, DataCache, Lookback, MarketDataProvider, YahooClient,
    };

    pub use crate::config::{HistoryConfig, PrismConfig};
    pub use crate::engine::VolEngine;
}

// Re-export main types at crate root
pub use crate::core::{PrismError, PrismResult};
pub use crate::engine::VolEngine;
