// demos/pricing_demo.rs

//! Prices a small option chain and prints fair values with display-scaled Greeks.
//!
//! Run with `RUST_LOG=debug` to see the kernel trace output.

use anyhow::Result;
use bsm_lab::{greeks, price, OptionKind, OptionParameters};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Black-Scholes-Merton Pricing Demo");
    println!("=================================");

    let spot = 100.0;
    let base = OptionParameters::new(spot, spot, 30.0 / 365.0, 0.05, 0.01, 0.25, OptionKind::Call);
    println!(
        "Spot ${:.2}, T = {:.4}y, r = {:.2}%, q = {:.2}%, sigma = {:.1}%",
        base.spot,
        base.time_to_expiry,
        base.rate * 100.0,
        base.dividend_yield * 100.0,
        base.volatility * 100.0
    );

    println!(
        "\n{:<6} {:>8} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "Type", "Strike", "Price", "Delta", "Gamma", "Vega", "Theta", "Rho"
    );
    println!("{}", "-".repeat(76));

    for kind in [OptionKind::Call, OptionKind::Put] {
        for strike in [90.0, 95.0, 100.0, 105.0, 110.0] {
            let params = OptionParameters { strike, ..base }.with_kind(kind);
            let g = greeks(&params).to_display();
            println!(
                "{:<6} {:>8.2} {:>10.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4}",
                kind,
                strike,
                price(&params),
                g.delta,
                g.gamma,
                g.vega,
                g.theta,
                g.rho
            );
        }
    }

    // Put-call parity check on the ATM pair
    let call = price(&base);
    let put = price(&base.with_kind(OptionKind::Put));
    let t = base.time_to_expiry;
    let parity =
        base.spot * (-base.dividend_yield * t).exp() - base.strike * (-base.rate * t).exp();
    println!(
        "\nATM parity: C - P = {:.6}, S·e^(-qT) - K·e^(-rT) = {:.6}",
        call - put,
        parity
    );

    Ok(())
}
