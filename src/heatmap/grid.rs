use tracing::{debug, warn};

use super::types::{AxisRange, HeatmapGrid, Metric};
use crate::config::HeatmapConfig;
use crate::models::bs::greeks::greeks;
use crate::models::bs::price;
use crate::option_params::{OptionKind, OptionParameters, SweepField};

/// Rescale step counts whose product exceeds `config.max_cells`.
///
/// The x/y aspect ratio is kept, each axis is floored at
/// `config.min_axis_steps`, and the longer axis is trimmed if the floor pushed
/// the product back over the ceiling. Counts below one are raised to one, as
/// [`AxisRange::values`] does; requests already under the ceiling are
/// otherwise returned unchanged.
pub fn cap_steps(x_steps: usize, y_steps: usize, config: &HeatmapConfig) -> (usize, usize) {
    let max_cells = config.max_cells;
    let (x_steps, y_steps) = (x_steps.max(1), y_steps.max(1));
    if x_steps.saturating_mul(y_steps) <= max_cells {
        return (x_steps, y_steps);
    }

    let ratio = x_steps as f64 / y_steps as f64;
    let new_y = (max_cells as f64 / ratio).sqrt().floor() as usize;
    let new_x = (ratio * new_y as f64).floor() as usize;

    let mut x = new_x.max(config.min_axis_steps);
    let mut y = new_y.max(config.min_axis_steps);

    if x * y > max_cells {
        if x >= y {
            x = max_cells / y;
        } else {
            y = max_cells / x;
        }
    }

    warn!(
        requested_x = x_steps,
        requested_y = y_steps,
        x,
        y,
        max_cells,
        "heatmap grid capped"
    );
    (x, y)
}

/// Value of `metric` at one parameter point.
///
/// `base_price` is the PnL reference and is ignored by other metrics.
pub fn metric_value(metric: Metric, params: &OptionParameters, base_price: f64) -> f64 {
    match metric {
        Metric::CallPrice => price(&params.with_kind(OptionKind::Call)),
        Metric::PutPrice => price(&params.with_kind(OptionKind::Put)),
        Metric::PnL => price(params) - base_price,
        Metric::Iv => params.volatility,
        Metric::Delta => greeks(params).delta,
        Metric::Gamma => greeks(params).gamma,
        Metric::Vega => greeks(params).to_display().vega,
        Metric::Theta => greeks(params).to_display().theta,
        Metric::Rho => greeks(params).to_display().rho,
    }
}

/// Heatmap with the default grid limits.
pub fn generate_grid(
    base: &OptionParameters,
    metric: Metric,
    x_field: SweepField,
    y_field: SweepField,
    x_range: &AxisRange,
    y_range: &AxisRange,
) -> HeatmapGrid {
    generate_grid_with_config(
        base,
        metric,
        x_field,
        y_field,
        x_range,
        y_range,
        &HeatmapConfig::default(),
    )
}

/// Evaluate `metric` over the `x_field` × `y_field` sweep around `base`.
///
/// Each cell prices a fresh copy of `base` with both swept fields replaced;
/// when both axes name the same field the x value wins.
pub fn generate_grid_with_config(
    base: &OptionParameters,
    metric: Metric,
    x_field: SweepField,
    y_field: SweepField,
    x_range: &AxisRange,
    y_range: &AxisRange,
    config: &HeatmapConfig,
) -> HeatmapGrid {
    let (x_steps, y_steps) = cap_steps(x_range.steps, y_range.steps, config);
    let x_values = x_range.values(x_steps);
    let y_values = y_range.values(y_steps);

    let base_price = match metric {
        Metric::PnL => price(base),
        _ => 0.0,
    };

    debug!(
        %metric,
        %x_field,
        %y_field,
        cols = x_values.len(),
        rows = y_values.len(),
        "generating heatmap"
    );

    let matrix = y_values
        .iter()
        .map(|&y| {
            let row_params = base.with_field(y_field, y);
            x_values
                .iter()
                .map(|&x| metric_value(metric, &row_params.with_field(x_field, x), base_price))
                .collect()
        })
        .collect();

    HeatmapGrid {
        x_values,
        y_values,
        matrix,
    }
}
