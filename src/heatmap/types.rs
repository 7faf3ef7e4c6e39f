use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One axis of a parameter sweep: `steps` evenly spaced values over `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

impl AxisRange {
    pub fn new(min: f64, max: f64, steps: usize) -> Self {
        Self { min, max, steps }
    }

    /// Axis values for `steps` points. Fewer than two steps yields `[min]`.
    pub fn values(&self, steps: usize) -> Vec<f64> {
        if steps <= 1 {
            return vec![self.min];
        }
        let step = (self.max - self.min) / (steps - 1) as f64;
        (0..steps).map(|i| self.min + i as f64 * step).collect()
    }
}

/// Quantity plotted in each heatmap cell.
///
/// Greek metrics are display-scaled: vega per vol point, theta per day and
/// rho per 1% rate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Call Price")]
    CallPrice,
    #[serde(rename = "Put Price")]
    PutPrice,
    /// Price change against the base parameters, same option kind.
    #[serde(rename = "PnL")]
    PnL,
    Delta,
    Gamma,
    Vega,
    Theta,
    Rho,
    /// The cell's volatility input, passed through unchanged.
    #[serde(rename = "IV")]
    Iv,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::CallPrice,
        Metric::PutPrice,
        Metric::PnL,
        Metric::Delta,
        Metric::Gamma,
        Metric::Vega,
        Metric::Theta,
        Metric::Rho,
        Metric::Iv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::CallPrice => "Call Price",
            Metric::PutPrice => "Put Price",
            Metric::PnL => "PnL",
            Metric::Delta => "Delta",
            Metric::Gamma => "Gamma",
            Metric::Vega => "Vega",
            Metric::Theta => "Theta",
            Metric::Rho => "Rho",
            Metric::Iv => "IV",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .iter()
            .copied()
            .find(|metric| metric.name() == s.trim())
            .ok_or_else(|| anyhow!("Unknown heatmap metric: {}", s))
    }
}

/// Metric values over a 2D sweep.
///
/// `matrix[row][col]` is the value at `(x_values[col], y_values[row])`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatmapGrid {
    #[serde(rename = "xValues")]
    pub x_values: Vec<f64>,
    #[serde(rename = "yValues")]
    pub y_values: Vec<f64>,
    #[serde(rename = "zMatrix")]
    pub matrix: Vec<Vec<f64>>,
}

impl HeatmapGrid {
    pub fn cell_count(&self) -> usize {
        self.x_values.len() * self.y_values.len()
    }

    /// Value at column `col`, row `row`.
    pub fn value(&self, col: usize, row: usize) -> Option<f64> {
        self.matrix.get(row).and_then(|r| r.get(col)).copied()
    }

    /// `(min, max)` over finite cells, `None` for an empty or all-NaN grid.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.matrix
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
