// Closed-form Black-Scholes-Merton pricing with a continuous dividend yield.
// Degenerate inputs resolve to explicit sentinel values rather than NaN.

pub mod greeks;
pub mod iv;

use crate::models::stats::norm_cdf;
use crate::models::utils::{d1_d2, forward_price, intrinsic_value, VOL_FLOOR};
use crate::option_params::{OptionKind, OptionParameters};

/// Fair value of a European option.
///
/// Edge cases are resolved in this order:
/// 1. `S <= 0` or `K <= 0` prices at zero.
/// 2. `T <= 0` prices at undiscounted intrinsic value.
/// 3. `sigma < 1e-9` prices the discounted payoff on the forward.
/// 4. Otherwise the standard formula, clamped at zero.
#[allow(non_snake_case)]
pub fn bs_price(S: f64, K: f64, T: f64, r: f64, q: f64, sigma: f64, kind: OptionKind) -> f64 {
    if S <= 0.0 || K <= 0.0 {
        return 0.0;
    }
    if T <= 0.0 {
        return intrinsic_value(kind, S, K);
    }
    if sigma < VOL_FLOOR {
        let fwd = forward_price(S, r, q, T);
        return intrinsic_value(kind, fwd, K) * (-r * T).exp();
    }

    let (d1, d2) = d1_d2(S, K, T, r, q, sigma);
    let disc_spot = S * (-q * T).exp();
    let disc_strike = K * (-r * T).exp();

    let price = match kind {
        OptionKind::Call => disc_spot * norm_cdf(d1) - disc_strike * norm_cdf(d2),
        OptionKind::Put => disc_strike * norm_cdf(-d2) - disc_spot * norm_cdf(-d1),
    };

    price.max(0.0)
}

/// Price of a European call option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, r: f64, q: f64, T: f64, sigma: f64) -> f64 {
    bs_price(S, K, T, r, q, sigma, OptionKind::Call)
}

/// Price of a European put option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_put_price(S: f64, K: f64, r: f64, q: f64, T: f64, sigma: f64) -> f64 {
    bs_price(S, K, T, r, q, sigma, OptionKind::Put)
}

/// [`bs_price`] over a parameter record.
pub fn price(params: &OptionParameters) -> f64 {
    bs_price(
        params.spot,
        params.strike,
        params.time_to_expiry,
        params.rate,
        params.dividend_yield,
        params.volatility,
        params.kind,
    )
}
