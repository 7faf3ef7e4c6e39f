//! Option contract parameters shared by every kernel in the crate.
//!
//! [`OptionParameters`] is a plain `Copy` value record. Sweeps never mutate a
//! shared instance; they derive a fresh record per grid cell through
//! [`OptionParameters::with_field`].

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    #[default]
    Call,
    Put,
}

impl OptionKind {
    pub fn is_call(self) -> bool {
        matches!(self, OptionKind::Call)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            other => Err(anyhow!("Invalid option type: {}", other)),
        }
    }
}

/// Full Black-Scholes-Merton input set for a single European option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    /// Spot price of the underlying (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub time_to_expiry: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Continuous dividend yield (q)
    pub dividend_yield: f64,
    /// Annualised volatility (sigma)
    pub volatility: f64,
    pub kind: OptionKind,
}

impl Default for OptionParameters {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            time_to_expiry: 1.0,
            rate: 0.05,
            dividend_yield: 0.0,
            volatility: 0.2,
            kind: OptionKind::Call,
        }
    }
}

impl OptionParameters {
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            rate,
            dividend_yield,
            volatility,
            kind,
        }
    }

    /// Call with zero dividend yield.
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, rate: f64, volatility: f64) -> Self {
        Self::new(spot, strike, time_to_expiry, rate, 0.0, volatility, OptionKind::Call)
    }

    /// Put with zero dividend yield.
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, rate: f64, volatility: f64) -> Self {
        Self::new(spot, strike, time_to_expiry, rate, 0.0, volatility, OptionKind::Put)
    }

    pub fn with_kind(self, kind: OptionKind) -> Self {
        Self { kind, ..self }
    }

    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    pub fn with_dividend_yield(self, dividend_yield: f64) -> Self {
        Self {
            dividend_yield,
            ..self
        }
    }

    /// Returns a copy with one numeric field replaced.
    pub fn with_field(self, field: SweepField, value: f64) -> Self {
        let mut out = self;
        match field {
            SweepField::Spot => out.spot = value,
            SweepField::Strike => out.strike = value,
            SweepField::TimeToExpiry => out.time_to_expiry = value,
            SweepField::Rate => out.rate = value,
            SweepField::DividendYield => out.dividend_yield = value,
            SweepField::Volatility => out.volatility = value,
        }
        out
    }

    /// Reads one numeric field.
    pub fn field(&self, field: SweepField) -> f64 {
        match field {
            SweepField::Spot => self.spot,
            SweepField::Strike => self.strike,
            SweepField::TimeToExpiry => self.time_to_expiry,
            SweepField::Rate => self.rate,
            SweepField::DividendYield => self.dividend_yield,
            SweepField::Volatility => self.volatility,
        }
    }
}

/// Numeric fields of [`OptionParameters`] that a heatmap axis can sweep.
///
/// Serialized with the short market symbols (`S`, `K`, `T`, `r`, `q`, `sigma`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepField {
    #[serde(rename = "S")]
    Spot,
    #[serde(rename = "K")]
    Strike,
    #[serde(rename = "T")]
    TimeToExpiry,
    #[serde(rename = "r")]
    Rate,
    #[serde(rename = "q")]
    DividendYield,
    #[serde(rename = "sigma")]
    Volatility,
}

impl SweepField {
    pub const ALL: [SweepField; 6] = [
        SweepField::Spot,
        SweepField::Strike,
        SweepField::TimeToExpiry,
        SweepField::Rate,
        SweepField::DividendYield,
        SweepField::Volatility,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            SweepField::Spot => "S",
            SweepField::Strike => "K",
            SweepField::TimeToExpiry => "T",
            SweepField::Rate => "r",
            SweepField::DividendYield => "q",
            SweepField::Volatility => "sigma",
        }
    }
}

impl fmt::Display for SweepField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for SweepField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SweepField::ALL
            .iter()
            .copied()
            .find(|field| field.symbol() == s.trim())
            .ok_or_else(|| anyhow!("Unknown sweep field: {}", s))
    }
}
