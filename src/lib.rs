//! # BSM-Lab: Closed-Form Option Pricing, Greeks and Parameter Sweeps
//!
//! `bsm-lab` is a small quantitative engine built around the Black-Scholes-Merton
//! model with a continuous dividend yield. It prices European calls and puts,
//! computes first-order sensitivities, inverts prices to implied volatility and
//! sweeps any two inputs to build heatmaps of a chosen metric.
//!
//! ## Core Features
//!
//! - **Pricing**: analytic fair value with explicit handling of expired,
//!   zero-volatility and degenerate inputs
//! - **Greeks**: delta, gamma, vega, theta and rho in natural units
//! - **Implied Volatility**: bisection with no-arbitrage pre-checks and a
//!   tagged status for every outcome
//! - **Heatmaps**: 2D sweeps over `S`, `K`, `T`, `r`, `q` or `sigma` with a
//!   hard cell-count ceiling, plus CSV and SVG export
//! - **JSON boundary**: batch pricing with per-item error isolation
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_lab::{generate_grid, greeks, implied_vol, price};
//! use bsm_lab::{AxisRange, IvStatus, Metric, OptionParameters, SweepField};
//!
//! let params = OptionParameters::call(100.0, 100.0, 1.0, 0.05, 0.2);
//!
//! let fair = price(&params);
//! assert!((fair - 10.4506).abs() < 1e-4);
//!
//! let g = greeks(&params);
//! assert!((g.delta - 0.6368).abs() < 1e-4);
//!
//! let iv = implied_vol(fair, &params);
//! assert_eq!(iv.status, IvStatus::Ok);
//!
//! let grid = generate_grid(
//!     &params,
//!     Metric::PnL,
//!     SweepField::Spot,
//!     SweepField::Volatility,
//!     &AxisRange::new(50.0, 150.0, 3),
//!     &AxisRange::new(0.1, 0.3, 3),
//! );
//! assert!(grid.matrix[1][1].abs() < 1e-12);
//! ```
//!
//! ## Units
//!
//! Kernel outputs are unscaled: theta per year, vega per 1.0 of volatility and
//! rho per 1.0 of rate. [`Greeks::to_display`] converts to per-day and per-1%
//! figures; heatmap Greek metrics and the [`api`] layer use that conversion.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod api;
pub mod config;
pub mod heatmap;
pub mod models;
pub mod option_params;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Parameters and configuration
pub use config::{EngineConfig, HeatmapConfig, SolverConfig};
pub use option_params::{OptionKind, OptionParameters, SweepField};

// Kernels
pub use models::bs::greeks::{bs_greeks, Greeks};
pub use models::bs::iv::{implied_vol_with_config, IvResult, IvStatus};
pub use models::bs::{bs_call_price, bs_price, bs_put_price};
pub use models::stats::{norm_cdf, norm_pdf};

// Heatmaps
pub use heatmap::{generate_grid_with_config, AxisRange, HeatmapGrid, Metric};

// Boundary layer
pub use api::{run_compute, ComputeRequest, ComputeResponse};

// ================================================================================================
// ENTRY POINTS
// ================================================================================================

/// Black-Scholes-Merton fair value of a European option.
///
/// Never negative. Returns zero for non-positive spot or strike and the
/// undiscounted intrinsic value once `time_to_expiry <= 0`.
///
/// # Example
///
/// ```rust
/// use bsm_lab::{price, OptionParameters};
///
/// let call = OptionParameters::call(100.0, 100.0, 1.0, 0.05, 0.2);
/// let put = OptionParameters::put(100.0, 100.0, 1.0, 0.05, 0.2);
///
/// // Put-call parity with q = 0: C - P = S - K·exp(-rT)
/// let parity = 100.0 - 100.0 * (-0.05f64).exp();
/// assert!((price(&call) - price(&put) - parity).abs() < 1e-9);
/// ```
pub fn price(params: &OptionParameters) -> f64 {
    models::bs::price(params)
}

/// First-order sensitivities in natural units.
///
/// All zero for `time_to_expiry <= 1e-7`; volatility is floored at `1e-9`.
pub fn greeks(params: &OptionParameters) -> Greeks {
    models::bs::greeks::greeks(params)
}

/// Volatility that reproduces `market_price` under [`price`].
///
/// The volatility in `params` is ignored. See [`IvStatus`] for the possible
/// outcomes; only [`IvStatus::Ok`] denotes convergence.
///
/// # Example
///
/// ```rust
/// use bsm_lab::{implied_vol, IvStatus, OptionParameters};
///
/// let params = OptionParameters::call(100.0, 90.0, 0.5, 0.03, 0.2);
///
/// // Below the discounted intrinsic lower bound.
/// let result = implied_vol(1.0, &params);
/// assert_eq!(result.status, IvStatus::ArbitrageViolation);
/// assert!(result.iv.is_none());
/// assert!(result.bounds.is_some());
/// ```
pub fn implied_vol(market_price: f64, params: &OptionParameters) -> IvResult {
    models::bs::iv::implied_vol(market_price, params)
}

/// Sweep `x_field` over `x_range` and `y_field` over `y_range` around `base`,
/// evaluating `metric` in every cell.
///
/// Requests above 6400 cells are rescaled; `matrix[row][col]` corresponds to
/// `(x_values[col], y_values[row])`.
pub fn generate_grid(
    base: &OptionParameters,
    metric: Metric,
    x_field: SweepField,
    y_field: SweepField,
    x_range: &AxisRange,
    y_range: &AxisRange,
) -> HeatmapGrid {
    heatmap::generate_grid(base, metric, x_field, y_field, x_range, y_range)
}
