//! JSON boundary around the pricing engine.
//!
//! A request carries a batch of parameter sets and an optional heatmap request.
//! Missing fields take defaults, `S`/`K`/`sigma` are floored at `1e-9` and `T`
//! at zero before any kernel runs. Each batch item is decoded independently so
//! a malformed entry produces an error record instead of failing the batch.
//! Greeks leave this layer display-scaled (see [`Greeks::to_display`]).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::heatmap::{generate_grid_with_config, AxisRange, HeatmapGrid, Metric};
use crate::models::bs::greeks::{greeks, Greeks};
use crate::models::bs::iv::{implied_vol_with_config, IvStatus};
use crate::models::bs::price;
use crate::option_params::{OptionKind, OptionParameters, SweepField};

/// Floor applied to spot, strike and volatility.
pub const POSITIVE_FLOOR: f64 = 1e-9;

/// Raw request. Items and the heatmap request stay untyped until
/// [`ParamsInput`] / [`HeatmapRequest`] decoding so that one bad entry cannot
/// reject the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComputeRequest {
    #[serde(default)]
    pub tickers: Option<Vec<String>>,
    #[serde(default)]
    pub params: Vec<Value>,
    #[serde(default)]
    pub heatmap: Option<Value>,
}

/// One batch item as supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParamsInput {
    #[serde(rename = "S")]
    pub spot: Option<f64>,
    #[serde(rename = "K")]
    pub strike: Option<f64>,
    #[serde(rename = "T")]
    pub time_to_expiry: Option<f64>,
    pub r: Option<f64>,
    pub q: Option<f64>,
    pub sigma: Option<f64>,
    pub option_type: Option<OptionKind>,
    pub market_price: Option<f64>,
}

impl ParamsInput {
    /// Defaulted and clamped parameters.
    pub fn resolve(&self) -> OptionParameters {
        let defaults = OptionParameters::default();
        OptionParameters {
            spot: floor_positive(self.spot.unwrap_or(defaults.spot)),
            strike: floor_positive(self.strike.unwrap_or(defaults.strike)),
            time_to_expiry: self
                .time_to_expiry
                .unwrap_or(defaults.time_to_expiry)
                .max(0.0),
            rate: self.r.unwrap_or(defaults.rate),
            dividend_yield: self.q.unwrap_or(defaults.dividend_yield),
            volatility: floor_positive(self.sigma.unwrap_or(defaults.volatility)),
            kind: self.option_type.unwrap_or(defaults.kind),
        }
    }
}

fn floor_positive(v: f64) -> f64 {
    if v <= POSITIVE_FLOOR {
        POSITIVE_FLOOR
    } else {
        v
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeatmapRequest {
    #[serde(default = "default_metric")]
    pub metric: String,
    #[serde(rename = "xVar", default = "default_x_var")]
    pub x_var: String,
    #[serde(rename = "yVar", default = "default_y_var")]
    pub y_var: String,
    #[serde(rename = "xRange", default = "default_x_range")]
    pub x_range: AxisRange,
    #[serde(rename = "yRange", default = "default_y_range")]
    pub y_range: AxisRange,
}

fn default_metric() -> String {
    Metric::CallPrice.name().to_string()
}

fn default_x_var() -> String {
    SweepField::Spot.symbol().to_string()
}

fn default_y_var() -> String {
    SweepField::Volatility.symbol().to_string()
}

fn default_x_range() -> AxisRange {
    AxisRange::new(50.0, 150.0, 20)
}

fn default_y_range() -> AxisRange {
    AxisRange::new(0.1, 0.5, 20)
}

/// Per-ticker output card.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TickerCard {
    pub ticker: String,
    pub call: f64,
    pub put: f64,
    pub delta: f64,
    pub gamma: f64,
    /// Per vol point
    pub vega: f64,
    /// Per calendar day
    pub theta: f64,
    /// Per 1% rate move
    pub rho: f64,
    pub iv: Option<f64>,
    pub iv_status: Option<IvStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Heatmap output for one ticker; an empty grid with `error` on failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GridEntry {
    #[serde(flatten)]
    pub grid: HeatmapGrid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComputeResponse {
    pub tickers: Vec<TickerCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<Vec<GridEntry>>,
}

/// JSON in, JSON out, default engine settings.
pub fn run_compute(payload: &str) -> String {
    run_compute_with_config(payload, &EngineConfig::default())
}

/// JSON in, JSON out. Never fails: an undecodable payload becomes
/// `{"error": "Top level error: ..."}`.
pub fn run_compute_with_config(payload: &str, config: &EngineConfig) -> String {
    let response = serde_json::from_str::<ComputeRequest>(payload)
        .context("Invalid compute payload")
        .map(|request| compute(&request, config));

    let encoded = match response {
        Ok(response) => serde_json::to_string(&response).map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };

    encoded.unwrap_or_else(|e| {
        warn!(error = %e, "compute request rejected");
        serde_json::json!({ "error": format!("Top level error: {:#}", e) }).to_string()
    })
}

/// Price every item of `request` and build the optional heatmaps.
pub fn compute(request: &ComputeRequest, config: &EngineConfig) -> ComputeResponse {
    let tickers: Vec<String> = request
        .tickers
        .clone()
        .unwrap_or_else(|| vec!["T1".into(), "T2".into(), "T3".into()]);
    let ticker_name = |i: usize| {
        tickers
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("T{}", i + 1))
    };

    let decoded: Vec<Result<ParamsInput>> = request
        .params
        .iter()
        .map(|raw| {
            serde_json::from_value::<ParamsInput>(raw.clone()).context("Invalid option parameters")
        })
        .collect();

    let cards = decoded
        .iter()
        .enumerate()
        .map(|(i, input)| match input {
            Ok(input) => ticker_card(ticker_name(i), input, config),
            Err(e) => {
                warn!(index = i, error = %e, "batch item failed");
                TickerCard {
                    ticker: ticker_name(i),
                    error: Some(format!("{:#}", e)),
                    ..TickerCard::default()
                }
            }
        })
        .collect();

    let heatmap = request.heatmap.as_ref().map(|raw| {
        let sweep = decode_sweep(raw);
        if let Err(e) = &sweep {
            warn!(error = %e, "heatmap request rejected");
        }
        decoded
            .iter()
            .map(|input| {
                let result = match (&sweep, input) {
                    (Ok(sweep), Ok(input)) => Ok(generate_grid_with_config(
                        &input.resolve(),
                        sweep.metric,
                        sweep.x_field,
                        sweep.y_field,
                        &sweep.x_range,
                        &sweep.y_range,
                        &config.heatmap,
                    )),
                    (Err(e), _) | (_, Err(e)) => Err(format!("{:#}", e)),
                };
                match result {
                    Ok(grid) => GridEntry { grid, error: None },
                    Err(error) => GridEntry {
                        grid: HeatmapGrid::default(),
                        error: Some(error),
                    },
                }
            })
            .collect()
    });

    ComputeResponse {
        tickers: cards,
        heatmap,
    }
}

/// Heatmap request with metric and axis names resolved.
struct Sweep {
    metric: Metric,
    x_field: SweepField,
    y_field: SweepField,
    x_range: AxisRange,
    y_range: AxisRange,
}

fn decode_sweep(raw: &Value) -> Result<Sweep> {
    let req = serde_json::from_value::<HeatmapRequest>(raw.clone())
        .context("Invalid heatmap request")?;
    Ok(Sweep {
        metric: req.metric.parse::<Metric>()?,
        x_field: req.x_var.parse::<SweepField>().context("Invalid xVar")?,
        y_field: req.y_var.parse::<SweepField>().context("Invalid yVar")?,
        x_range: req.x_range,
        y_range: req.y_range,
    })
}

fn ticker_card(ticker: String, input: &ParamsInput, config: &EngineConfig) -> TickerCard {
    let params = input.resolve();
    let call = price(&params.with_kind(OptionKind::Call));
    let put = price(&params.with_kind(OptionKind::Put));
    let Greeks {
        delta,
        gamma,
        vega,
        theta,
        rho,
    } = greeks(&params).to_display();

    let iv = input
        .market_price
        .map(|mkt| implied_vol_with_config(mkt, &params, &config.solver));
    debug!(%ticker, call, put, iv_status = ?iv.map(|r| r.status), "priced batch item");

    TickerCard {
        ticker,
        call,
        put,
        delta,
        gamma,
        vega,
        theta,
        rho,
        iv: iv.and_then(|r| r.iv),
        iv_status: iv.map(|r| r.status),
        error: None,
    }
}
