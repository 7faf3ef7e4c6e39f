// demos/heatmap_demo.rs

//! Builds a spot × volatility heatmap and writes it to `heatmap.csv` and
//! `heatmap.svg` in the working directory.
//!
//! Usage:
//!     cargo run --example heatmap_demo -- [METRIC] [X_FIELD] [Y_FIELD]
//!
//! e.g. `cargo run --example heatmap_demo -- Theta S T`

use anyhow::Result;
use bsm_lab::heatmap::{render_grid_svg, save_grid_csv};
use bsm_lab::{generate_grid, AxisRange, Metric, OptionParameters, SweepField};
use tracing_subscriber::EnvFilter;

fn default_range(field: SweepField, base: &OptionParameters) -> AxisRange {
    match field {
        SweepField::Spot | SweepField::Strike => {
            let centre = base.field(field);
            AxisRange::new(centre * 0.5, centre * 1.5, 41)
        }
        SweepField::TimeToExpiry => AxisRange::new(0.02, 2.0, 40),
        SweepField::Rate | SweepField::DividendYield => AxisRange::new(0.0, 0.1, 21),
        SweepField::Volatility => AxisRange::new(0.05, 0.8, 40),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let metric = args
        .first()
        .map(|s| s.parse::<Metric>())
        .transpose()?
        .unwrap_or(Metric::CallPrice);
    let x_field = args
        .get(1)
        .map(|s| s.parse::<SweepField>())
        .transpose()?
        .unwrap_or(SweepField::Spot);
    let y_field = args
        .get(2)
        .map(|s| s.parse::<SweepField>())
        .transpose()?
        .unwrap_or(SweepField::Volatility);

    let base = OptionParameters::default();
    let x_range = default_range(x_field, &base);
    let y_range = default_range(y_field, &base);

    let grid = generate_grid(&base, metric, x_field, y_field, &x_range, &y_range);
    println!(
        "{} over {} ({} steps) x {} ({} steps)",
        metric,
        x_field,
        grid.x_values.len(),
        y_field,
        grid.y_values.len()
    );
    if let Some((lo, hi)) = grid.value_range() {
        println!("Value range: [{:.6}, {:.6}]", lo, hi);
    }

    save_grid_csv(&grid, "heatmap.csv")?;
    let title = format!("{} | x = {}, y = {}", metric, x_field, y_field);
    render_grid_svg(&grid, &title, "heatmap.svg")?;

    println!("Grid saved to heatmap.csv and heatmap.svg");
    Ok(())
}
