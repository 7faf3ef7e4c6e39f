use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Implied volatility bisection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Lower end of the volatility search domain
    #[serde(default = "default_vol_lower")]
    pub vol_lower: f64,

    /// Upper end of the volatility search domain
    #[serde(default = "default_vol_upper")]
    pub vol_upper: f64,

    /// Maximum bisection steps before returning a best-effort estimate
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Absolute price difference accepted as convergence
    #[serde(default = "default_price_tolerance")]
    pub price_tolerance: f64,

    /// Slack applied to the no-arbitrage bounds and the intrinsic check
    #[serde(default = "default_arbitrage_epsilon")]
    pub arbitrage_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            vol_lower: default_vol_lower(),
            vol_upper: default_vol_upper(),
            max_iterations: default_max_iterations(),
            price_tolerance: default_price_tolerance(),
            arbitrage_epsilon: default_arbitrage_epsilon(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.vol_lower > 0.0 && self.vol_lower < self.vol_upper) {
            return Err(anyhow!(
                "Volatility domain must satisfy 0 < lower < upper, got [{}, {}]",
                self.vol_lower,
                self.vol_upper
            ));
        }
        if self.max_iterations == 0 {
            return Err(anyhow!("max_iterations must be positive"));
        }
        if self.price_tolerance <= 0.0 || self.arbitrage_epsilon < 0.0 {
            return Err(anyhow!(
                "Invalid tolerances: price_tolerance={}, arbitrage_epsilon={}",
                self.price_tolerance,
                self.arbitrage_epsilon
            ));
        }
        Ok(())
    }
}

/// Heatmap grid limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Ceiling on `x_steps * y_steps`
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,

    /// Per-axis floor applied when a grid is rescaled
    #[serde(default = "default_min_axis_steps")]
    pub min_axis_steps: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            max_cells: default_max_cells(),
            min_axis_steps: default_min_axis_steps(),
        }
    }
}

impl HeatmapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_axis_steps == 0 {
            return Err(anyhow!("min_axis_steps must be positive"));
        }
        if self.max_cells < self.min_axis_steps * self.min_axis_steps {
            return Err(anyhow!(
                "max_cells ({}) cannot hold a {}x{} grid",
                self.max_cells,
                self.min_axis_steps,
                self.min_axis_steps
            ));
        }
        Ok(())
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub heatmap: HeatmapConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(s).context("Failed to parse engine config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.solver.validate().context("Invalid [solver] section")?;
        self.heatmap.validate().context("Invalid [heatmap] section")?;
        Ok(())
    }
}

fn default_vol_lower() -> f64 {
    1e-6
}

fn default_vol_upper() -> f64 {
    5.0
}

fn default_max_iterations() -> u32 {
    100
}

fn default_price_tolerance() -> f64 {
    1e-7
}

fn default_arbitrage_epsilon() -> f64 {
    1e-7
}

fn default_max_cells() -> usize {
    6400
}

fn default_min_axis_steps() -> usize {
    10
}
