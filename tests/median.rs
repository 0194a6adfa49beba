mod common;

use common::{naive_rank, noise_grid, window_of};
use winfilter::prelude::*;

const GATES: [f64; 4] = [0.5, 0.1, 0.3, 0.9];

#[test]
fn test_variants_agree_on_noise() {
    let grid = noise_grid(17, 13, 7);
    for radius in 1..7 {
        let config = FilterConfig::new(radius).unwrap();
        let hist = HistogramMedianFilter::with_config(config).apply(&grid).unwrap();
        let twolevel = TwoLevelMedianFilter::with_config(config).apply(&grid).unwrap();
        let sorted = LocalSortMedianFilter::with_config(config).apply(&grid).unwrap();
        assert_eq!(hist, twolevel, "radius {}", radius);
        assert_eq!(hist, sorted, "radius {}", radius);
    }
}

#[test]
fn test_variants_match_brute_force_for_every_gate() {
    let grid = noise_grid(11, 9, 42);
    for radius in [1, 2, 4] {
        for gate in GATES {
            let config = FilterConfig::with_gate(radius, gate).unwrap();
            let expected = naive_rank(&grid, &config);
            assert_eq!(
                TwoLevelMedianFilter::with_config(config).apply(&grid).unwrap(),
                expected
            );
            assert_eq!(
                HistogramMedianFilter::with_config(config).apply(&grid).unwrap(),
                expected
            );
            assert_eq!(
                LocalSortMedianFilter::with_config(config).apply(&grid).unwrap(),
                expected
            );
        }
    }
}

#[test]
fn test_real_valued_samples() {
    let base = noise_grid(10, 12, 3);
    let grid = base.map(|v| v as f64 * 0.37 - 20.0).unwrap();
    let config = FilterConfig::with_gate(3, 0.4).unwrap();
    let expected = naive_rank(&grid, &config);
    assert_eq!(
        HistogramMedianFilter::with_config(config).apply(&grid).unwrap(),
        expected
    );
    assert_eq!(
        LocalSortMedianFilter::with_config(config).apply(&grid).unwrap(),
        expected
    );
}

#[test]
fn test_sixteen_bit_samples() {
    let base = noise_grid(9, 9, 11);
    let grid = base.map(|v| v as u16 * 257).unwrap();
    let config = FilterConfig::new(2).unwrap();
    let hist = HistogramMedianFilter::with_config(config).apply(&grid).unwrap();
    let sorted = LocalSortMedianFilter::with_config(config).apply(&grid).unwrap();
    assert_eq!(hist, sorted);
    assert_eq!(hist, naive_rank(&grid, &config));
}

#[test]
fn test_constant_grid() {
    let grid = SampleGrid::new_with_fill(8, 6, 123_u8).unwrap();
    for radius in 1..6 {
        for gate in GATES {
            let config = FilterConfig::with_gate(radius, gate).unwrap();
            for out in [
                HistogramMedianFilter::with_config(config).apply(&grid).unwrap(),
                TwoLevelMedianFilter::with_config(config).apply(&grid).unwrap(),
                LocalSortMedianFilter::with_config(config).apply(&grid).unwrap(),
            ] {
                assert!(out.as_slice().iter().all(|v| *v == 123));
            }
        }
    }
    let grid = SampleGrid::new_with_fill(5, 7, -2.5_f32).unwrap();
    let out = HistogramMedianFilter::new(4).unwrap().apply(&grid).unwrap();
    assert!(out.as_slice().iter().all(|v| *v == -2.5));
}

#[test]
fn test_repeated_row_scenario() {
    let row = [10_u8, 20, 30, 40, 50];
    let grid = SampleGrid::from_fn(5, 5, |x, _| row[x]).unwrap();

    let mut window = window_of(&grid, 1, 2, 2);
    window.sort();
    let expected = window[9 / 2];
    assert_eq!(expected, 30);

    let f = TwoLevelMedianFilter::new(1).unwrap();
    assert_eq!(f.apply(&grid).unwrap()[(2, 2)], expected);
    let f = HistogramMedianFilter::new(1).unwrap();
    assert_eq!(f.apply(&grid).unwrap()[(2, 2)], expected);
    let f = LocalSortMedianFilter::new(1).unwrap();
    assert_eq!(f.apply(&grid).unwrap()[(2, 2)], expected);
}

#[test]
fn test_rank_is_monotonic_in_gate() {
    let grid = noise_grid(12, 12, 99);
    let gates = [0.05, 0.2, 0.35, 0.5, 0.65, 0.8, 0.95];
    let outputs: Vec<SampleGrid<u8>> = gates
        .iter()
        .map(|g| {
            TwoLevelMedianFilter::with_config(FilterConfig::with_gate(2, *g).unwrap())
                .apply(&grid)
                .unwrap()
        })
        .collect();
    for pair in outputs.windows(2) {
        pair[0]
            .as_slice()
            .iter()
            .zip(pair[1].as_slice().iter())
            .for_each(|(lo, hi)| assert!(lo <= hi));
    }
}

#[test]
fn test_low_gate_is_not_idempotent() {
    // With the gate at the window minimum the filter erodes, and a gradient
    // keeps eroding on every pass.
    let grid = SampleGrid::from_fn(10, 10, |x, y| (x * 10 + y * 7) as u8).unwrap();
    let config = FilterConfig::with_gate(1, 0.1).unwrap();
    let f = LocalSortMedianFilter::with_config(config);
    let once = f.apply(&grid).unwrap();
    let twice = f.apply(&once).unwrap();
    assert_ne!(once, twice);
    assert_eq!(once[(5, 5)], 4 * 10 + 4 * 7);
    assert_eq!(twice[(5, 5)], 3 * 10 + 3 * 7);

    let f = TwoLevelMedianFilter::with_config(config);
    assert_eq!(f.apply(&f.apply(&grid).unwrap()).unwrap(), twice);
}

#[test]
fn test_radius_at_limit() {
    // r = min(W, H) - 1 is the largest radius the reflection supports
    let grid = noise_grid(4, 9, 5);
    let config = FilterConfig::new(3).unwrap();
    let expected = naive_rank(&grid, &config);
    assert_eq!(
        TwoLevelMedianFilter::with_config(config).apply(&grid).unwrap(),
        expected
    );
    assert_eq!(
        HistogramMedianFilter::with_config(config).apply(&grid).unwrap(),
        expected
    );
    assert_eq!(
        LocalSortMedianFilter::with_config(config).apply(&grid).unwrap(),
        expected
    );
}
