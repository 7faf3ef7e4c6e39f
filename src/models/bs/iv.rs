//! Implied volatility by bisection.
//!
//! The solver inverts [`bs_price`](super::bs_price) over a fixed volatility
//! domain. It assumes price is non-decreasing in volatility, which holds for
//! the Black-Scholes-Merton model and is not re-checked per call. Every
//! outcome is reported through [`IvStatus`]; the solver never errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};

use super::price;
use crate::config::SolverConfig;
use crate::models::utils::arbitrage_bounds;
use crate::option_params::OptionParameters;

/// Outcome of an implied volatility solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IvStatus {
    /// Time to expiry is zero or negative.
    Expired,
    /// Market price is zero or negative.
    InvalidPrice,
    /// Market price lies outside the no-arbitrage bounds.
    ArbitrageViolation,
    /// Market price sits on the lower bound; the zero-volatility limit.
    Intrinsic,
    /// Target is below the price at the bottom of the volatility domain.
    ClippedLow,
    /// Target is above the price at the top of the volatility domain.
    ClippedHigh,
    /// Bisection hit the price tolerance.
    Ok,
    /// Iteration budget exhausted; the estimate is the last midpoint.
    ConvergedTol,
}

impl IvStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IvStatus::Expired => "expired",
            IvStatus::InvalidPrice => "invalid_price",
            IvStatus::ArbitrageViolation => "arbitrage_violation",
            IvStatus::Intrinsic => "intrinsic",
            IvStatus::ClippedLow => "clipped_low",
            IvStatus::ClippedHigh => "clipped_high",
            IvStatus::Ok => "ok",
            IvStatus::ConvergedTol => "converged_tol",
        }
    }
}

impl fmt::Display for IvStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvResult {
    /// Volatility estimate; `None` when no volatility reproduces the price.
    pub iv: Option<f64>,
    pub status: IvStatus,
    /// Completed bisection steps, for `Ok` and `ConvergedTol`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    /// `(lower, upper)` price bounds, for `ArbitrageViolation`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<(f64, f64)>,
}

impl IvResult {
    fn new(iv: Option<f64>, status: IvStatus) -> Self {
        Self {
            iv,
            status,
            iterations: None,
            bounds: None,
        }
    }

    /// True only when bisection met its tolerance.
    ///
    /// `ConvergedTol` carries a usable estimate but is not a convergence.
    pub fn is_converged(&self) -> bool {
        self.status == IvStatus::Ok
    }

    /// True when `iv` holds a number.
    pub fn is_usable(&self) -> bool {
        self.iv.is_some()
    }
}

/// Implied volatility with the default solver settings.
pub fn implied_vol(market_price: f64, params: &OptionParameters) -> IvResult {
    implied_vol_with_config(market_price, params, &SolverConfig::default())
}

/// Implied volatility for `params` ignoring `params.volatility`.
pub fn implied_vol_with_config(
    market_price: f64,
    params: &OptionParameters,
    config: &SolverConfig,
) -> IvResult {
    if params.time_to_expiry <= 0.0 {
        debug!(t = params.time_to_expiry, "implied vol requested for expired option");
        return IvResult::new(Some(0.0), IvStatus::Expired);
    }
    if market_price <= 0.0 {
        debug!(market_price, "implied vol requested for non-positive price");
        return IvResult::new(None, IvStatus::InvalidPrice);
    }

    let (lower, upper) = arbitrage_bounds(params);
    let eps = config.arbitrage_epsilon;

    if market_price < lower - eps || market_price > upper + eps {
        debug!(market_price, lower, upper, "price outside no-arbitrage bounds");
        return IvResult {
            bounds: Some((lower, upper)),
            ..IvResult::new(None, IvStatus::ArbitrageViolation)
        };
    }
    if (market_price - lower).abs() < eps {
        return IvResult::new(Some(0.0), IvStatus::Intrinsic);
    }

    let mut low = config.vol_lower;
    let mut high = config.vol_upper;

    let price_low = price(&params.with_volatility(low));
    let price_high = price(&params.with_volatility(high));

    if market_price < price_low {
        debug!(market_price, price_low, "target below volatility domain");
        return IvResult::new(Some(low), IvStatus::ClippedLow);
    }
    if market_price > price_high {
        debug!(market_price, price_high, "target above volatility domain");
        return IvResult::new(Some(high), IvStatus::ClippedHigh);
    }

    let mut mid = 0.5 * (low + high);
    let mut iterations = 0;

    while iterations < config.max_iterations {
        mid = 0.5 * (low + high);
        let diff = price(&params.with_volatility(mid)) - market_price;
        trace!(iterations, mid, diff, "bisection step");

        if diff.abs() < config.price_tolerance {
            debug!(iv = mid, iterations, "implied vol converged");
            return IvResult {
                iterations: Some(iterations),
                ..IvResult::new(Some(mid), IvStatus::Ok)
            };
        }

        if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }
        iterations += 1;
    }

    warn!(
        iv = mid,
        iterations, "implied vol bisection exhausted its iteration budget"
    );
    IvResult {
        iterations: Some(iterations),
        ..IvResult::new(Some(mid), IvStatus::ConvergedTol)
    }
}
