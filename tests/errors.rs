mod common;

use common::noise_grid;
use winfilter::prelude::*;

fn all_u8_filters(radius: usize) -> Vec<Box<dyn WindowFilter<u8>>> {
    vec![
        Box::new(BoxMeanFilter::new(radius).unwrap()),
        Box::new(HistogramMedianFilter::new(radius).unwrap()),
        Box::new(TwoLevelMedianFilter::new(radius).unwrap()),
        Box::new(LocalSortMedianFilter::new(radius).unwrap()),
    ]
}

#[test]
fn test_radius_too_large() {
    let grid = noise_grid(4, 9, 3);
    for f in all_u8_filters(4) {
        assert_eq!(
            f.apply(&grid),
            Err(FilterError::RadiusTooLarge {
                radius: 4,
                limit: 4
            }),
            "{}",
            f.name()
        );
    }
}

#[test]
fn test_destination_untouched_on_error() {
    let grid = noise_grid(3, 3, 8);
    let mut dest = SampleGrid::new_with_fill(3, 3, 42_u8).unwrap();
    for f in all_u8_filters(5) {
        assert!(f.filter(&grid, &mut dest).is_err());
        assert!(dest.as_slice().iter().all(|v| *v == 42));
    }
}

#[test]
fn test_destination_size_mismatch() {
    let grid = noise_grid(6, 6, 9);
    let mut dest = SampleGrid::new_with_fill(6, 5, 0_u8).unwrap();
    let f = LocalSortMedianFilter::new(1).unwrap();
    assert_eq!(
        f.filter(&grid, &mut dest),
        Err(FilterError::SizeMismatch {
            width: 6,
            height: 6,
            dest_width: 6,
            dest_height: 5
        })
    );
}

#[test]
fn test_filter_into_destination() {
    let grid = noise_grid(7, 5, 10);
    let f = HistogramMedianFilter::new(2).unwrap();
    let mut dest = SampleGrid::new_with_fill(7, 5, 0_u8).unwrap();
    f.filter(&grid, &mut dest).unwrap();
    assert_eq!(dest, f.apply(&grid).unwrap());
}

#[test]
fn test_filter_slice() {
    let grid = noise_grid(7, 5, 11);
    let f = BoxMeanFilter::new(1).unwrap();
    let mut dest = vec![0_u8; 35];
    f.filter_slice(grid.as_slice(), &mut dest, 7, 5).unwrap();
    assert_eq!(dest, f.apply(&grid).unwrap().into_vec());

    let mut short = vec![0_u8; 34];
    assert_eq!(
        f.filter_slice(grid.as_slice(), &mut short, 7, 5),
        Err(FilterError::BufferLength {
            expected: 35,
            actual: 34
        })
    );
    assert!(f.filter_slice(&grid.as_slice()[1..], &mut dest, 7, 5).is_err());
}

#[test]
fn test_bad_configuration() {
    assert_eq!(
        BoxMeanFilter::new(0).unwrap_err(),
        FilterError::InvalidRadius(0)
    );
    let mut f = TwoLevelMedianFilter::new(2).unwrap();
    assert_eq!(f.set_gate(0.0), Err(FilterError::InvalidGate(0.0)));
    assert!(f.set_gate(1.0).is_err());
    assert!(f.configure(0, 0.5).is_err());
    assert!(f.configure(3, 1.5).is_err());
    assert_eq!(f.config().radius(), 2);
    assert_eq!(f.config().gate(), 0.5);

    f.configure(3, 0.25).unwrap();
    assert_eq!(f.config().radius(), 3);
    assert_eq!(f.config().gate(), 0.25);
}

#[test]
fn test_reconfigured_filter_is_reusable() {
    let grid = noise_grid(9, 9, 12);
    let mut f = LocalSortMedianFilter::new(1).unwrap();
    let small = f.apply(&grid).unwrap();
    f.set_radius(3).unwrap();
    let large = f.apply(&grid).unwrap();
    f.set_radius(1).unwrap();
    assert_eq!(f.apply(&grid).unwrap(), small);
    assert_eq!(large.dimensions(), (9, 9));
}

#[test]
fn test_overflowing_dimensions_rejected() {
    let f = BoxMeanFilter::new(1).unwrap();
    let source: Vec<u8> = vec![];
    let mut dest: Vec<u8> = vec![];
    assert_eq!(
        f.filter_slice(source.as_slice(), dest.as_mut_slice(), usize::MAX, 2),
        Err(FilterError::InvalidDimensions {
            width: usize::MAX,
            height: 2
        })
    );
    assert_eq!(
        SampleGrid::from_vec(Vec::<u8>::new(), 2, usize::MAX),
        Err(FilterError::InvalidDimensions {
            width: 2,
            height: usize::MAX
        })
    );
}

#[test]
fn test_allocation_failure_reported() {
    assert!(matches!(
        SampleGrid::new_with_fill(usize::MAX / 2, 2, 0_u8),
        Err(FilterError::Allocation(_))
    ));
    assert!(matches!(
        winfilter::error::try_vec(usize::MAX, 0_u32),
        Err(FilterError::Allocation(_))
    ));
}
