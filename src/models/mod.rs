pub mod bs;

/// Standard normal distribution primitives
pub mod stats {
    use std::f64::consts::{PI, SQRT_2};

    /// Standard normal probability density function.
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Standard normal cumulative distribution function.
    ///
    /// Evaluated through `libm::erf`, which is accurate to double precision.
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + libm::erf(x / SQRT_2))
    }
}

/// Shared Black-Scholes-Merton building blocks
pub mod utils {
    use crate::option_params::{OptionKind, OptionParameters};

    /// Volatility below this is treated as zero by the kernels.
    pub const VOL_FLOOR: f64 = 1e-9;

    /// Forward price `S·exp((r−q)T)`.
    pub fn forward_price(spot: f64, rate: f64, dividend_yield: f64, t: f64) -> f64 {
        spot * ((rate - dividend_yield) * t).exp()
    }

    /// Immediate-exercise payoff, no discounting.
    pub fn intrinsic_value(kind: OptionKind, spot: f64, strike: f64) -> f64 {
        match kind {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }

    /// The `d1`/`d2` pair. Callers guarantee `t > 0` and `sigma > 0`.
    pub fn d1_d2(s: f64, k: f64, t: f64, r: f64, q: f64, sigma: f64) -> (f64, f64) {
        let vol_sqrt_t = sigma * t.sqrt();
        let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }

    /// No-arbitrage price bounds `(lower, upper)` for a European option.
    pub fn arbitrage_bounds(params: &OptionParameters) -> (f64, f64) {
        let t = params.time_to_expiry;
        let disc_spot = params.spot * (-params.dividend_yield * t).exp();
        let disc_strike = params.strike * (-params.rate * t).exp();
        match params.kind {
            OptionKind::Call => ((disc_spot - disc_strike).max(0.0), disc_spot),
            OptionKind::Put => ((disc_strike - disc_spot).max(0.0), disc_strike),
        }
    }
}
