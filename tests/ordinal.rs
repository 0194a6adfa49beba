mod common;

use common::noise_grid;
use winfilter::prelude::*;

#[test]
fn test_round_trip_over_grid() {
    let grid = noise_grid(13, 7, 5).map(|v| (v as f64).sqrt()).unwrap();
    let table = OrdinalTable::from_samples(grid.as_slice()).unwrap();
    let ordinals = table.map_grid(&grid).unwrap();
    assert_eq!(ordinals.dimensions(), grid.dimensions());
    for (o, v) in ordinals.as_slice().iter().zip(grid.as_slice()) {
        assert_eq!(table.value(*o as usize), *v);
        assert!((*o as usize) < table.len());
    }
}

#[test]
fn test_order_is_preserved() {
    let samples = [3.5_f32, -1.0, 3.5, 0.0, 12.25, -1.0];
    let table = OrdinalTable::from_samples(&samples).unwrap();
    assert_eq!(table.values(), &[-1.0, 0.0, 3.5, 12.25]);
    for a in samples.iter() {
        for b in samples.iter() {
            assert_eq!(
                table.ordinal(*a).cmp(&table.ordinal(*b)),
                a.partial_cmp(b).unwrap()
            );
        }
    }
    assert_eq!(table.try_ordinal(2.0), None);
}

#[test]
fn test_ordinals_are_dense() {
    let samples = [40_u16, 10, 30, 20, 40, 10];
    let table = OrdinalTable::from_samples(&samples).unwrap();
    let mut ords: Vec<usize> = samples.iter().map(|v| table.ordinal(*v)).collect();
    ords.sort_unstable();
    ords.dedup();
    assert_eq!(ords, vec![0, 1, 2, 3]);
}
