// demos/iv_demo.rs

//! Solves implied volatility for a handful of quotes, including the edge cases
//! the solver reports through its status tag.

use anyhow::Result;
use bsm_lab::{implied_vol, price, EngineConfig, OptionParameters};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Optional TOML config as the first argument; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    println!("Solver settings: {:?}", config.solver);

    let params = OptionParameters::call(100.0, 105.0, 0.5, 0.04, 0.2);
    let fair = price(&params.with_volatility(0.32));

    let quotes = [
        ("fair value at 32% vol", fair),
        ("zero price", 0.0),
        ("below intrinsic bound", 0.0001),
        ("above spot", 120.0),
        ("just under spot", 99.999),
    ];

    println!(
        "\n{:<24} {:>10} {:>10} {:>22} {:>6}",
        "Quote", "Price", "IV", "Status", "Iter"
    );
    println!("{}", "-".repeat(76));

    for (label, quote) in quotes {
        let result = bsm_lab::implied_vol_with_config(quote, &params, &config.solver);
        println!(
            "{:<24} {:>10.4} {:>10} {:>22} {:>6}",
            label,
            quote,
            result
                .iv
                .map(|v| format!("{:.4}%", v * 100.0))
                .unwrap_or_else(|| "-".to_string()),
            result.status,
            result
                .iterations
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
        if let Some((lo, hi)) = result.bounds {
            println!("{:<24} bounds [{:.4}, {:.4}]", "", lo, hi);
        }
    }

    let check = implied_vol(fair, &params);
    println!("\nRound trip converged: {}", check.is_converged());
    Ok(())
}
