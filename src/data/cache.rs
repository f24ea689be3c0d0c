//! Local data caching
//!
//! Caches provider responses as JSON files so repeated analysis of the same
//! ticker does not hit the network. Entries expire after `max_age_secs`.
//! The pricing core never sees the cache: it wraps a provider.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::provider::{Lookback, MarketDataProvider};
use crate::core::{PrismResult, QuoteChain};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in seconds)
    pub max_age_secs: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_secs: 3600,
            enabled: true,
        }
    }
}

/// File-backed key/value cache
pub struct DataCache {
    config: CacheConfig,
}

impl DataCache {
    pub fn new(config: CacheConfig) -> PrismResult<Self> {
        // Create cache directory if needed
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }

        Ok(Self { config })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.config.cache_dir.join(format!("{}.json", sanitize(key)))
    }

    /// Check if an entry exists and has not expired
    pub fn is_valid(&self, key: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let modified = fs::metadata(self.path(key)).and_then(|m| m.modified());
        match modified {
            Ok(modified) => {
                let modified: DateTime<Utc> = modified.into();
                // An age beyond chrono's range never expires
                Duration::try_seconds(self.config.max_age_secs)
                    .map_or(true, |max_age| Utc::now() - modified < max_age)
            }
            Err(_) => false,
        }
    }

    /// Load an entry if present and fresh
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> PrismResult<Option<T>> {
        if !self.is_valid(key) {
            return Ok(None);
        }

        let json = fs::read_to_string(self.path(key))?;
        let value = serde_json::from_str(&json)?;

        tracing::info!(key, "loaded from cache");
        Ok(Some(value))
    }

    /// Store an entry
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> PrismResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.path(key);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;

        tracing::info!(key, path = ?path, "cached");
        Ok(())
    }

    /// Return the cached value or compute, store and return it
    pub fn get_or_fetch<T, F>(&self, key: &str, fetch: F) -> PrismResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> PrismResult<T>,
    {
        if let Some(value) = self.load(key)? {
            return Ok(value);
        }

        let value = fetch()?;
        self.save(key, &value)?;
        Ok(value)
    }

    /// Clear all entries for a symbol
    pub fn clear(&self, symbol: &str) -> PrismResult<()> {
        if !self.config.cache_dir.exists() {
            return Ok(());
        }

        let prefix = format!("{}_", sanitize(symbol));
        for entry in fs::read_dir(&self.config.cache_dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();

            if file_name.starts_with(&prefix) {
                fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }
}

/// Keep cache file names portable
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Provider decorator that memoizes every request in a [`DataCache`]
pub struct CachedProvider<P> {
    inner: P,
    cache: DataCache,
}

impl<P: MarketDataProvider> CachedProvider<P> {
    pub fn new(inner: P, config: CacheConfig) -> PrismResult<Self> {
        Ok(Self {
            inner,
            cache: DataCache::new(config)?,
        })
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drop everything cached for a symbol so the next call refetches
    pub fn refresh(&self, symbol: &str) -> PrismResult<()> {
        self.cache.clear(symbol)
    }
}

impl<P: MarketDataProvider> MarketDataProvider for CachedProvider<P> {
    fn spot_price(&self, symbol: &str) -> PrismResult<Option<f64>> {
        self.cache
            .get_or_fetch(&format!("{}_spot", symbol), || self.inner.spot_price(symbol))
    }

    fn expiries(&self, symbol: &str) -> PrismResult<Vec<NaiveDate>> {
        self.cache
            .get_or_fetch(&format!("{}_expiries", symbol), || self.inner.expiries(symbol))
    }

    fn option_chain(&self, symbol: &str, expiry: NaiveDate) -> PrismResult<QuoteChain> {
        self.cache.get_or_fetch(&format!("{}_chain_{}", symbol, expiry), || {
            self.inner.option_chain(symbol, expiry)
        })
    }

    fn price_history(&self, symbol: &str, lookback: Lookback) -> PrismResult<Vec<f64>> {
        self.cache.get_or_fetch(&format!("{}_history_{}", symbol, lookback), || {
            self.inner.price_history(symbol, lookback)
        })
    }
}
