//! Option Greeks
//!
//! First order sensitivities plus a fixed enumeration of the Greeks with
//! their display metadata.

use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt (time decay, per calendar day)
    pub theta: f64,
    /// Vega: dV/dσ (per 1% vol move)
    pub vega: f64,
    /// Rho: dV/dr (per 1% rate move)
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Value of a single Greek
    pub fn get(&self, greek: Greek) -> f64 {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Theta => self.theta,
            Greek::Vega => self.vega,
            Greek::Rho => self.rho,
        }
    }

    /// Round every field to `places` decimals
    pub fn rounded(&self, places: i32) -> Self {
        let factor = 10f64.powi(places);
        let r = |v: f64| (v * factor).round() / factor;
        Self {
            delta: r(self.delta),
            gamma: r(self.gamma),
            theta: r(self.theta),
            vega: r(self.vega),
            rho: r(self.rho),
        }
    }

    /// (Greek, value) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Greek, f64)> + '_ {
        Greek::ALL.iter().map(move |&g| (g, self.get(g)))
    }
}

/// The five first-order Greeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Greek {
    Delta,
    Gamma,
    Theta,
    Vega,
    Rho,
}

impl Greek {
    pub const ALL: [Greek; 5] = [
        Greek::Delta,
        Greek::Gamma,
        Greek::Theta,
        Greek::Vega,
        Greek::Rho,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Greek::Delta => "Delta",
            Greek::Gamma => "Gamma",
            Greek::Theta => "Theta",
            Greek::Vega => "Vega",
            Greek::Rho => "Rho",
        }
    }

    /// Unit the value is quoted in
    pub fn unit(&self) -> &'static str {
        match self {
            Greek::Delta => "per $1 spot move",
            Greek::Gamma => "delta per $1 spot move",
            Greek::Theta => "per calendar day",
            Greek::Vega => "per 1% volatility move",
            Greek::Rho => "per 1% rate move",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Greek::Delta => "Change in option price for a $1 change in the underlying price.",
            Greek::Gamma => "Rate of change of delta for a $1 change in the underlying price.",
            Greek::Theta => "Value the option loses each day as expiry approaches, all else equal.",
            Greek::Vega => "Change in option price for a 1 percentage point change in volatility.",
            Greek::Rho => "Change in option price for a 1 percentage point change in interest rates.",
        }
    }

    /// Side-specific reading; only delta differs between calls and puts
    pub fn side_description(&self, option_type: OptionType) -> Option<&'static str> {
        match (self, option_type) {
            (Greek::Delta, OptionType::Call) => Some(
                "Call delta runs from 0 to 1: deep in-the-money calls move almost one-for-one with the stock.",
            ),
            (Greek::Delta, OptionType::Put) => Some(
                "Put delta runs from -1 to 0: deep in-the-money puts gain almost $1 for every $1 the stock falls.",
            ),
            _ => None,
        }
    }
}
