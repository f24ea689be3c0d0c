//! Data fetching and storage
//!
//! Handles:
//! - The provider trait the engine consumes
//! - Yahoo Finance spot, option chains and price history
//! - Local caching of provider responses

pub mod cache;
pub mod provider;
pub mod yahoo;

pub use cache::*;
pub use provider::*;
pub use yahoo::*;
