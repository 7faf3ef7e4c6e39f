// CSV and SVG export for heatmap grids.

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use std::io::Write;
use std::path::Path;

use super::types::HeatmapGrid;

const SVG_SIZE: (u32, u32) = (1024, 768);

/// Write `grid` as CSV: a header of x values, then one row per y value.
pub fn write_grid_csv<W: Write>(grid: &HeatmapGrid, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(grid.x_values.len() + 1);
    header.push("y\\x".to_string());
    header.extend(grid.x_values.iter().map(|x| x.to_string()));
    wtr.write_record(&header)?;

    for (y, row) in grid.y_values.iter().zip(&grid.matrix) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(y.to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn save_grid_csv(grid: &HeatmapGrid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_grid_csv(grid, file)
}

/// Render `grid` to an SVG file.
pub fn render_grid_svg(grid: &HeatmapGrid, title: &str, path: impl AsRef<Path>) -> Result<()> {
    let root = SVGBackend::new(path.as_ref(), SVG_SIZE).into_drawing_area();
    draw_grid(grid, title, root)
}

/// Render `grid` to an in-memory SVG document.
pub fn render_grid_svg_string(grid: &HeatmapGrid, title: &str) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, SVG_SIZE).into_drawing_area();
        draw_grid(grid, title, root)?;
    }
    Ok(buf)
}

fn draw_grid<DB: DrawingBackend>(
    grid: &HeatmapGrid,
    title: &str,
    root: DrawingArea<DB, plotters::coord::Shift>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let cols = grid.x_values.len();
    let rows = grid.y_values.len();
    if cols == 0 || rows == 0 {
        return Err(anyhow!("Cannot render an empty heatmap grid"));
    }
    let (lo, hi) = grid
        .value_range()
        .ok_or_else(|| anyhow!("Heatmap grid has no finite values"))?;
    let span = if hi > lo { hi - lo } else { 1.0 };

    root.fill(&WHITE)?;

    // Cells are laid out in index space; labels map back to axis values.
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..cols as f64, 0.0..rows as f64)?;

    let x_label = |v: &f64| axis_label(&grid.x_values, *v);
    let y_label = |v: &f64| axis_label(&grid.y_values, *v);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .draw()?;

    chart.draw_series(grid.matrix.iter().enumerate().flat_map(|(row, values)| {
        values.iter().enumerate().map(move |(col, v)| {
            let color = if v.is_finite() {
                HSLColor(0.66 * (1.0 - (v - lo) / span), 0.8, 0.5).filled()
            } else {
                BLACK.filled()
            };
            Rectangle::new(
                [(col as f64, row as f64), (col as f64 + 1.0, row as f64 + 1.0)],
                color,
            )
        })
    }))?;

    root.present()?;
    Ok(())
}

fn axis_label(values: &[f64], pos: f64) -> String {
    let idx = (pos.floor().max(0.0) as usize).min(values.len().saturating_sub(1));
    values
        .get(idx)
        .map(|v| format!("{:.3}", v))
        .unwrap_or_default()
}
