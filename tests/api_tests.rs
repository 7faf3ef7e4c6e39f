use approx::assert_abs_diff_eq;
use bsm_lab::{greeks, price, run_compute, OptionParameters};
use serde_json::{json, Value};

fn compute(payload: Value) -> Value {
    serde_json::from_str(&run_compute(&payload.to_string())).expect("response is valid JSON")
}

#[test]
fn test_defaults_fill_missing_fields() {
    let out = compute(json!({ "params": [{}] }));
    let card = &out["tickers"][0];

    assert_eq!(card["ticker"], "T1");
    let reference = OptionParameters::default();
    assert_abs_diff_eq!(card["call"].as_f64().unwrap(), price(&reference), epsilon = 1e-12);
    assert_abs_diff_eq!(card["delta"].as_f64().unwrap(), 0.6368, epsilon = 1e-4);
    assert!(card["iv"].is_null());
    assert!(card["iv_status"].is_null());
    assert!(out.get("heatmap").is_none());
}

#[test]
fn test_cards_are_display_scaled() {
    let out = compute(json!({
        "tickers": ["AAPL"],
        "params": [{
            "S": 105, "K": 100, "T": 0.5, "r": 0.03, "q": 0.01, "sigma": 0.3,
            "option_type": "put"
        }]
    }));
    let card = &out["tickers"][0];
    let p = OptionParameters::new(105.0, 100.0, 0.5, 0.03, 0.01, 0.3, bsm_lab::OptionKind::Put);
    let raw = greeks(&p);

    assert_eq!(card["ticker"], "AAPL");
    assert_abs_diff_eq!(card["put"].as_f64().unwrap(), price(&p), epsilon = 1e-12);
    assert_abs_diff_eq!(card["delta"].as_f64().unwrap(), raw.delta, epsilon = 1e-12);
    assert_abs_diff_eq!(card["vega"].as_f64().unwrap(), raw.vega / 100.0, epsilon = 1e-12);
    assert_abs_diff_eq!(card["theta"].as_f64().unwrap(), raw.theta / 365.0, epsilon = 1e-12);
    assert_abs_diff_eq!(card["rho"].as_f64().unwrap(), raw.rho / 100.0, epsilon = 1e-12);
}

#[test]
fn test_market_price_reports_iv() {
    let market = price(&OptionParameters::default().with_volatility(0.35));
    let out = compute(json!({ "params": [{ "market_price": market }, { "market_price": 0.5 }] }));

    assert_eq!(out["tickers"][0]["iv_status"], "ok");
    assert_abs_diff_eq!(out["tickers"][0]["iv"].as_f64().unwrap(), 0.35, epsilon = 1e-4);

    // 0.5 is below the call's discounted intrinsic lower bound.
    assert_eq!(out["tickers"][1]["iv_status"], "arbitrage_violation");
    assert!(out["tickers"][1]["iv"].is_null());
}

#[test]
fn test_malformed_item_is_isolated() {
    let out = compute(json!({
        "tickers": ["A", "B", "C"],
        "params": [{ "S": 100 }, { "S": "abc" }, { "option_type": "straddle" }, { "K": 90 }]
    }));
    let cards = out["tickers"].as_array().unwrap();

    assert_eq!(cards.len(), 4);
    assert!(cards[0].get("error").is_none());
    assert!(cards[0]["call"].as_f64().unwrap() > 0.0);

    for bad in &cards[1..3] {
        assert!(bad["error"].as_str().unwrap().contains("Invalid option parameters"));
        assert_eq!(bad["call"], 0.0);
        assert_eq!(bad["delta"], 0.0);
    }
    assert_eq!(cards[1]["ticker"], "B");

    // More params than tickers: names fall back to T{n}.
    assert_eq!(cards[3]["ticker"], "T4");
    assert!(cards[3].get("error").is_none());
}

#[test]
fn test_inputs_are_clamped() {
    let out = compute(json!({ "params": [{ "S": -5, "sigma": 0, "T": -1 }] }));
    let card = &out["tickers"][0];

    assert!(card.get("error").is_none());
    assert_eq!(card["call"], 0.0);
    // Expired put with S≈0 is worth the strike.
    assert_abs_diff_eq!(card["put"].as_f64().unwrap(), 100.0, epsilon = 1e-6);
    assert_eq!(card["gamma"], 0.0);
}

#[test]
fn test_heatmap_per_item() {
    let out = compute(json!({
        "params": [{}, { "sigma": "high" }],
        "heatmap": {
            "metric": "PnL",
            "xVar": "S",
            "yVar": "sigma",
            "xRange": { "min": 50, "max": 150, "steps": 3 },
            "yRange": { "min": 0.1, "max": 0.3, "steps": 3 }
        }
    }));
    let grids = out["heatmap"].as_array().unwrap();

    assert_eq!(grids.len(), 2);
    assert_eq!(grids[0]["xValues"].as_array().unwrap().len(), 3);
    assert_abs_diff_eq!(grids[0]["zMatrix"][1][1].as_f64().unwrap(), 0.0, epsilon = 1e-9);
    assert!(grids[0].get("error").is_none());

    assert!(grids[1]["error"].is_string());
    assert!(grids[1]["zMatrix"].as_array().unwrap().is_empty());
}

#[test]
fn test_heatmap_defaults_and_bad_axis() {
    let out = compute(json!({ "params": [{}], "heatmap": {} }));
    let grid = &out["heatmap"][0];
    assert_eq!(grid["xValues"].as_array().unwrap().len(), 20);
    assert_eq!(grid["yValues"][0], 0.1);

    let out = compute(json!({ "params": [{}], "heatmap": { "xVar": "volume" } }));
    let err = out["heatmap"][0]["error"].as_str().unwrap();
    assert!(err.contains("xVar"), "{}", err);
}

/// An undecodable heatmap range fails every grid but leaves the cards intact.
#[test]
fn test_bad_heatmap_range_is_per_grid_error() {
    let out = compute(json!({
        "params": [{ "S": 100 }, { "K": 90 }],
        "heatmap": { "xRange": { "min": 50, "max": 150 } }
    }));

    assert!(out.get("error").is_none());
    let cards = out["tickers"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert!(cards[0]["call"].as_f64().unwrap() > 0.0);
    assert!(cards[1].get("error").is_none());

    let grids = out["heatmap"].as_array().unwrap();
    assert_eq!(grids.len(), 2);
    for grid in grids {
        assert!(grid["error"].as_str().unwrap().contains("steps"));
        assert!(grid["zMatrix"].as_array().unwrap().is_empty());
    }

    let out = compute(json!({
        "params": [{}],
        "heatmap": { "yRange": { "min": 0.1, "max": 0.5, "steps": 2.5 } }
    }));
    assert_eq!(out["tickers"].as_array().unwrap().len(), 1);
    assert!(out["heatmap"][0]["error"].is_string());
}

#[test]
fn test_top_level_error() {
    let raw = run_compute("not json");
    let out: Value = serde_json::from_str(&raw).unwrap();
    assert!(out["error"].as_str().unwrap().starts_with("Top level error:"));

    let out = compute(json!({ "params": 3 }));
    assert!(out["error"].is_string());
}
