//! First-order Black-Scholes-Merton sensitivities.
//!
//! [`bs_greeks`] returns values in natural units: theta per year, vega per
//! 1.0 of volatility and rho per 1.0 of rate. Presentation layers convert with
//! [`Greeks::to_display`], which is the single place the per-day and per-1%
//! conventions live.

use serde::{Deserialize, Serialize};

use crate::models::stats::{norm_cdf, norm_pdf};
use crate::models::utils::{d1_d2, VOL_FLOOR};
use crate::option_params::{OptionKind, OptionParameters};

/// Expiries at or below this carry no sensitivity.
pub const MIN_GREEKS_EXPIRY: f64 = 1e-7;

/// Calendar days per year used for daily theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Divisor converting per-unit vega and rho to per-1% moves.
pub const PERCENT_SCALE: f64 = 100.0;

/// Delta, gamma, vega, theta and rho.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

impl Greeks {
    /// Daily theta, vega per 1 vol point, rho per 1% rate move.
    pub fn to_display(self) -> Greeks {
        Greeks {
            delta: self.delta,
            gamma: self.gamma,
            vega: self.vega / PERCENT_SCALE,
            theta: self.theta / DAYS_PER_YEAR,
            rho: self.rho / PERCENT_SCALE,
        }
    }
}

/// Analytic sensitivities in natural units.
///
/// All five are zero when `T <= 1e-7`, `S <= 0` or `K <= 0`. Volatility is
/// floored at `1e-9` so zero-vol inputs stay finite. Scale with
/// [`Greeks::to_display`] for per-point quoting.
#[allow(non_snake_case)]
pub fn bs_greeks(S: f64, K: f64, T: f64, r: f64, q: f64, sigma: f64, kind: OptionKind) -> Greeks {
    if T <= MIN_GREEKS_EXPIRY || S <= 0.0 || K <= 0.0 {
        return Greeks::default();
    }
    let sigma = sigma.max(VOL_FLOOR);

    let (d1, d2) = d1_d2(S, K, T, r, q, sigma);
    let pdf_d1 = norm_pdf(d1);
    let exp_qt = (-q * T).exp();
    let exp_rt = (-r * T).exp();
    let sqrt_t = T.sqrt();

    let gamma = exp_qt * pdf_d1 / (S * sigma * sqrt_t);
    let vega = S * exp_qt * pdf_d1 * sqrt_t;
    let decay = -S * exp_qt * pdf_d1 * sigma / (2.0 * sqrt_t);

    let (delta, rho, theta) = match kind {
        OptionKind::Call => {
            let cdf_d1 = norm_cdf(d1);
            let cdf_d2 = norm_cdf(d2);
            (
                exp_qt * cdf_d1,
                K * T * exp_rt * cdf_d2,
                decay - r * K * exp_rt * cdf_d2 + q * S * exp_qt * cdf_d1,
            )
        }
        OptionKind::Put => {
            let cdf_neg_d1 = norm_cdf(-d1);
            let cdf_neg_d2 = norm_cdf(-d2);
            (
                -exp_qt * cdf_neg_d1,
                -K * T * exp_rt * cdf_neg_d2,
                decay + r * K * exp_rt * cdf_neg_d2 - q * S * exp_qt * cdf_neg_d1,
            )
        }
    };

    Greeks {
        delta,
        gamma,
        vega,
        theta,
        rho,
    }
}

/// [`bs_greeks`] over a parameter record.
pub fn greeks(params: &OptionParameters) -> Greeks {
    bs_greeks(
        params.spot,
        params.strike,
        params.time_to_expiry,
        params.rate,
        params.dividend_yield,
        params.volatility,
        params.kind,
    )
}
