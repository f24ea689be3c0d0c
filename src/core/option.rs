//! Option contract definitions
//!
//! Option side, the pricing input tuple, and calendar helpers.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{PrismError, PrismResult};

/// Calendar days per year used for time to expiry
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OptionType {
    type Err = PrismError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(PrismError::invalid_input(format!(
                "Unknown option type '{}'",
                other
            ))),
        }
    }
}

/// One Black-Scholes evaluation point.
///
/// `time` is in years. A zero or negative `time` means the contract is
/// expired and prices at intrinsic value, in which case `vol` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    pub spot: f64,
    pub strike: f64,
    pub time: f64,
    pub rate: f64,
    pub vol: f64,
    pub option_type: OptionType,
}

impl PricingInputs {
    /// Build and validate a pricing tuple
    pub fn new(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        vol: f64,
        option_type: OptionType,
    ) -> PrismResult<Self> {
        let inputs = Self {
            spot,
            strike,
            time,
            rate,
            vol,
            option_type,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Check the domain preconditions of the closed-form formulas
    pub fn validate(&self) -> PrismResult<()> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(PrismError::invalid_input(format!(
                "Spot must be positive, got {}",
                self.spot
            )));
        }
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PrismError::invalid_input(format!(
                "Strike must be positive, got {}",
                self.strike
            )));
        }
        if self.time.is_nan() || !self.rate.is_finite() {
            return Err(PrismError::invalid_input("Time and rate must be finite"));
        }
        if self.is_expired() {
            return Ok(());
        }
        if !self.vol.is_finite() || self.vol <= 0.0 {
            return Err(PrismError::invalid_input(format!(
                "Volatility must be positive before expiry, got {}",
                self.vol
            )));
        }
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.time <= 0.0
    }

    /// Same tuple with a different volatility
    pub fn with_vol(&self, vol: f64) -> Self {
        Self { vol, ..*self }
    }

    /// Same tuple with a different spot
    pub fn with_spot(&self, spot: f64) -> Self {
        Self { spot, ..*self }
    }
}

/// Year fraction between `today` and `expiry` in calendar days / 365, rounded to 4 places
pub fn year_fraction(expiry: NaiveDate, today: NaiveDate) -> f64 {
    let days = (expiry - today).num_days();
    let years = days as f64 / DAYS_PER_YEAR;
    (years * 1e4).round() / 1e4
}
