//! Two-dimensional parameter sweeps of prices and Greeks.

pub mod export;
pub mod grid;
pub mod types;

pub use export::{render_grid_svg, render_grid_svg_string, save_grid_csv, write_grid_csv};
pub use grid::{cap_steps, generate_grid, generate_grid_with_config, metric_value};
pub use types::{AxisRange, HeatmapGrid, Metric};
