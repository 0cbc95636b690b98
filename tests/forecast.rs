//! Integration tests for the forecasting engine

use price_forecast::series::parse_prices;
use price_forecast::{simulate, Error, MonteCarloEngine, SimulationConfig};
use proptest::prelude::*;

#[test]
fn test_example_scenario() {
    let prices = [100.0, 102.0, 101.0, 105.0, 104.0];
    let result = simulate(&prices, 2, 200).unwrap().unwrap();

    assert_eq!(result.days.len(), 3);
    assert_eq!(
        result.days.iter().map(|d| d.day).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    let day0 = &result.days[0];
    for v in [day0.median, day0.p5, day0.p95, day0.outlier_min, day0.outlier_max] {
        assert_eq!(v, 104.0);
    }
    assert_eq!(result.summary.current, 104.0);
}

#[test]
fn test_preset_horizons() {
    let prices = parse_prices("[50, 51, 50.5, 52, 53, 52.5, 54]").unwrap();

    for horizon in price_forecast::config::HORIZON_PRESETS {
        let config = SimulationConfig::new(horizon, 500).with_seed(horizon as u64);
        let result = MonteCarloEngine::new(config)
            .unwrap()
            .simulate(&prices)
            .unwrap()
            .unwrap();

        assert_eq!(result.days.len(), horizon + 1);
        assert_eq!(result.final_day().unwrap().day, horizon);
    }
}

#[test]
fn test_band_widens_with_horizon() {
    let prices = [100.0, 103.0, 99.0, 104.0, 98.0, 105.0, 101.0];
    let config = SimulationConfig::new(100, 2000).with_seed(17);
    let result = MonteCarloEngine::new(config)
        .unwrap()
        .simulate(&prices)
        .unwrap()
        .unwrap();

    assert!(result.days[100].band_width() > result.days[10].band_width());
    assert_eq!(result.days[0].band_width(), 0.0);
}

#[test]
fn test_median_tracks_gbm_median() {
    let prices = [100.0, 101.0, 100.5, 102.0, 101.5, 103.0, 102.0, 104.0];
    let config = SimulationConfig::new(50, 5000).with_seed(5);
    let result = MonteCarloEngine::new(config)
        .unwrap()
        .simulate(&prices)
        .unwrap()
        .unwrap();

    let model = price_forecast::DailyGbm::from_statistics(104.0, &result.statistics).unwrap();
    let expected = model.median(50.0);
    let relative_error = (result.summary.projected_median - expected).abs() / expected;
    assert!(
        relative_error < 0.02,
        "Median: {:.2}, expected: {:.2}",
        result.summary.projected_median,
        expected
    );
}

#[test]
fn test_insufficient_history() {
    let err = simulate(&[100.0, 101.0], 20, 500).unwrap_err();
    assert!(matches!(err, Error::InsufficientData { required: 3, actual: 2 }));
    assert!(err.to_string().contains("at least 3 prices"));
}

fn price_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0_f64..1000.0, 3..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_shape_and_ordering(
        prices in price_series(),
        horizon in 1_usize..30,
        paths in 1_usize..200,
        seed in any::<u64>(),
    ) {
        let config = SimulationConfig::new(horizon, paths).with_seed(seed);
        let result = MonteCarloEngine::new(config).unwrap().simulate(&prices).unwrap().unwrap();
        let last_price = *prices.last().unwrap();

        prop_assert_eq!(result.days.len(), horizon + 1);
        prop_assert_eq!(result.summary.current, last_price);
        prop_assert_eq!(result.days[0].median, last_price);
        prop_assert_eq!(result.days[0].outlier_min, last_price);
        prop_assert_eq!(result.days[0].outlier_max, last_price);

        for (t, day) in result.days.iter().enumerate() {
            prop_assert_eq!(day.day, t);
            prop_assert!(day.p5 <= day.p25);
            prop_assert!(day.p25 <= day.median);
            prop_assert!(day.median <= day.p75);
            prop_assert!(day.p75 <= day.p95);
        }

        let last = result.final_day().unwrap();
        prop_assert_eq!(result.summary.projected_median, last.median);
        prop_assert_eq!(result.summary.projected_low, last.p5);
        prop_assert_eq!(result.summary.projected_high, last.p95);
        prop_assert!(last.outlier_min <= last.p5);
        prop_assert!(last.outlier_max >= last.p95);
        prop_assert!(result.summary.volatility.parse::<f64>().unwrap() >= 0.0);
    }

    #[test]
    fn prop_constant_history_is_flat(
        price in 0.01_f64..10_000.0,
        len in 3_usize..20,
        horizon in 1_usize..20,
        seed in any::<u64>(),
    ) {
        let prices = vec![price; len];
        let config = SimulationConfig::new(horizon, 50).with_seed(seed);
        let result = MonteCarloEngine::new(config).unwrap().simulate(&prices).unwrap().unwrap();

        prop_assert_eq!(result.summary.volatility.as_str(), "0.00");
        for day in &result.days {
            prop_assert_eq!(day.outlier_min, price);
            prop_assert_eq!(day.outlier_max, price);
            prop_assert_eq!(day.median, price);
        }
    }

    #[test]
    fn prop_seeded_runs_are_reproducible(prices in price_series(), seed in any::<u64>()) {
        let config = SimulationConfig::new(10, 100).with_seed(seed);
        let a = MonteCarloEngine::new(config.clone()).unwrap().simulate(&prices).unwrap();
        let b = MonteCarloEngine::new(config.with_parallel(false)).unwrap().simulate(&prices).unwrap();
        prop_assert_eq!(a, b);
    }
}
