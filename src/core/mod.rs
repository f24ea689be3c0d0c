//! Core data types
//!
//! Defines fundamental types:
//! - OptionType / PricingInputs: what a single Black-Scholes evaluation needs
//! - Greeks: sensitivities and the Greek enumeration
//! - OptionQuote / QuoteChain: raw market quotes per expiry
//! - Smile / ChainSmile / VolSurface: reconstructed implied volatility

pub mod error;
pub mod greeks;
pub mod option;
pub mod quote;
pub mod surface;

pub use error::*;
pub use greeks::*;
pub use option::*;
pub use quote::*;
pub use surface::*;
