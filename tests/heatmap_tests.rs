
use approx::assert_abs_diff_eq;
use bsm_lab::heatmap::{cap_steps, save_grid_csv};
use bsm_lab::{
    generate_grid, generate_grid_with_config, greeks, price, AxisRange, HeatmapConfig, Metric,
    OptionKind, OptionParameters, SweepField,
};
use test_utils::reference_call;

#[test]
fn test_pnl_grid_centre_is_zero() {
    let base = reference_call();
    let grid = generate_grid(
        &base,
        Metric::PnL,
        SweepField::Spot,
        SweepField::Volatility,
        &AxisRange::new(50.0, 150.0, 3),
        &AxisRange::new(0.1, 0.3, 3),
    );

    assert_eq!(grid.x_values, vec![50.0, 100.0, 150.0]);
    assert_eq!(grid.y_values.len(), 3);
    assert_eq!(grid.matrix.len(), 3);
    assert!(grid.matrix.iter().all(|row| row.len() == 3));
    assert_abs_diff_eq!(grid.matrix[1][1], 0.0, epsilon = 1e-9);

    // Higher spot is a gain for a call, lower spot a loss.
    assert!(grid.matrix[1][2] > 0.0);
    assert!(grid.matrix[1][0] < 0.0);
}

#[test]
fn test_pnl_uses_base_kind() {
    let base = reference_call().with_kind(OptionKind::Put);
    let grid = generate_grid(
        &base,
        Metric::PnL,
        SweepField::Spot,
        SweepField::Strike,
        &AxisRange::new(90.0, 110.0, 2),
        &AxisRange::new(100.0, 100.0, 1),
    );
    let put_at_90 = price(&OptionParameters { spot: 90.0, ..base });
    assert_abs_diff_eq!(grid.matrix[0][0], put_at_90 - price(&base), epsilon = 1e-12);
    assert!(grid.matrix[0][0] > 0.0);
}

/// `matrix[row][col]` is evaluated at `(x_values[col], y_values[row])`.
#[test]
fn test_orientation_rows_are_y() {
    let base = reference_call();
    let grid = generate_grid(
        &base,
        Metric::CallPrice,
        SweepField::Strike,
        SweepField::TimeToExpiry,
        &AxisRange::new(80.0, 120.0, 5),
        &AxisRange::new(0.25, 2.0, 4),
    );

    assert_eq!(grid.matrix.len(), 4);
    for (row, &t) in grid.y_values.iter().enumerate() {
        assert_eq!(grid.matrix[row].len(), 5);
        for (col, &k) in grid.x_values.iter().enumerate() {
            let expected = price(&OptionParameters {
                strike: k,
                time_to_expiry: t,
                ..base
            });
            assert_eq!(grid.value(col, row), Some(expected));
        }
    }
}

#[test]
fn test_call_and_put_metrics_ignore_base_kind() {
    let base = reference_call().with_kind(OptionKind::Put);
    let x = AxisRange::new(90.0, 110.0, 3);
    let y = AxisRange::new(0.2, 0.2, 1);

    let calls = generate_grid(
        &base,
        Metric::CallPrice,
        SweepField::Spot,
        SweepField::Volatility,
        &x,
        &y,
    );
    let puts = generate_grid(
        &base,
        Metric::PutPrice,
        SweepField::Spot,
        SweepField::Volatility,
        &x,
        &y,
    );

    for (col, &s) in calls.x_values.iter().enumerate() {
        let p = OptionParameters { spot: s, ..base };
        assert_eq!(calls.matrix[0][col], price(&p.with_kind(OptionKind::Call)));
        assert_eq!(puts.matrix[0][col], price(&p.with_kind(OptionKind::Put)));
    }
}

#[test]
fn test_greek_metrics_are_display_scaled() {
    let base = reference_call();
    let x = AxisRange::new(100.0, 100.0, 1);
    let y = AxisRange::new(0.2, 0.2, 1);
    let raw = greeks(&base);

    let cell = |metric| {
        generate_grid(&base, metric, SweepField::Spot, SweepField::Volatility, &x, &y).matrix[0][0]
    };

    assert_eq!(cell(Metric::Delta), raw.delta);
    assert_eq!(cell(Metric::Gamma), raw.gamma);
    assert_abs_diff_eq!(cell(Metric::Vega), raw.vega / 100.0, epsilon = 1e-15);
    assert_abs_diff_eq!(cell(Metric::Theta), raw.theta / 365.0, epsilon = 1e-15);
    assert_abs_diff_eq!(cell(Metric::Rho), raw.rho / 100.0, epsilon = 1e-15);
}

#[test]
fn test_iv_metric_passes_volatility_through() {
    let base = reference_call();
    let grid = generate_grid(
        &base,
        Metric::Iv,
        SweepField::Spot,
        SweepField::Volatility,
        &AxisRange::new(80.0, 120.0, 3),
        &AxisRange::new(0.1, 0.5, 5),
    );
    for (row, &sigma) in grid.y_values.iter().enumerate() {
        assert!(grid.matrix[row].iter().all(|&v| v == sigma));
    }

    // Not swept: every cell is the base volatility.
    let flat = generate_grid(
        &base,
        Metric::Iv,
        SweepField::Spot,
        SweepField::Strike,
        &AxisRange::new(80.0, 120.0, 3),
        &AxisRange::new(90.0, 110.0, 3),
    );
    assert!(flat.matrix.iter().flatten().all(|&v| v == 0.2));
}

#[test]
fn test_oversized_request_is_capped() {
    let base = reference_call();
    let grid = generate_grid(
        &base,
        Metric::Delta,
        SweepField::Spot,
        SweepField::Volatility,
        &AxisRange::new(50.0, 150.0, 200),
        &AxisRange::new(0.1, 0.5, 200),
    );

    assert!(grid.cell_count() <= 6400);
    assert_eq!(grid.x_values.len(), 80);
    assert_eq!(grid.y_values.len(), 80);
    assert_eq!(grid.x_values[0], 50.0);
    assert_abs_diff_eq!(*grid.x_values.last().unwrap(), 150.0, epsilon = 1e-9);
}

#[test]
fn test_cap_never_exceeds_ceiling() {
    let config = HeatmapConfig::default();
    for x in [1, 7, 64, 81, 250, 999, 5000] {
        for y in [1, 3, 80, 81, 400, 7000] {
            let (cx, cy) = cap_steps(x, y, &config);
            assert!(cx * cy <= 6400, "{}x{} -> {}x{}", x, y, cx, cy);
        }
    }
}

/// A zero-step axis still yields one value, so it cannot switch the cap off.
#[test]
fn test_zero_step_axis_is_still_capped() {
    let grid = generate_grid(
        &reference_call(),
        Metric::CallPrice,
        SweepField::Spot,
        SweepField::Volatility,
        &AxisRange::new(50.0, 150.0, 100_000),
        &AxisRange::new(0.1, 0.5, 0),
    );

    assert!(grid.cell_count() <= 6400, "{} cells", grid.cell_count());
    assert_eq!(grid.matrix.len(), grid.y_values.len());
    assert!(grid.matrix.iter().all(|row| row.len() == grid.x_values.len()));
}

#[test]
fn test_custom_ceiling() {
    let config = HeatmapConfig {
        max_cells: 400,
        min_axis_steps: 5,
    };
    let grid = generate_grid_with_config(
        &reference_call(),
        Metric::Gamma,
        SweepField::Spot,
        SweepField::Rate,
        &AxisRange::new(50.0, 150.0, 100),
        &AxisRange::new(0.0, 0.1, 50),
        &config,
    );
    assert!(grid.cell_count() <= 400);
    assert!(grid.x_values.len() > grid.y_values.len());
}

#[test]
fn test_same_field_on_both_axes_uses_x() {
    let base = reference_call();
    let grid = generate_grid(
        &base,
        Metric::Iv,
        SweepField::Volatility,
        SweepField::Volatility,
        &AxisRange::new(0.1, 0.3, 3),
        &AxisRange::new(0.9, 0.9, 2),
    );
    for row in &grid.matrix {
        assert_eq!(row, &grid.x_values);
    }
}

#[test]
fn test_save_csv_to_disk() {
    let grid = generate_grid(
        &reference_call(),
        Metric::CallPrice,
        SweepField::Spot,
        SweepField::Volatility,
        &AxisRange::new(90.0, 110.0, 3),
        &AxisRange::new(0.1, 0.3, 2),
    );
    let path = std::env::temp_dir().join("bsm_lab_heatmap_test.csv");
    save_grid_csv(&grid, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("y\\x,90,100,110"));
    std::fs::remove_file(&path).ok();
}
