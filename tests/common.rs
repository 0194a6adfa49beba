use winfilter::border::reflect_index;
use winfilter::prelude::*;

// Small linear congruential generator so tests do not need a random crate
#[allow(dead_code)]
pub fn noise_grid(width: usize, height: usize, seed: u32) -> SampleGrid<u8> {
    let mut state = seed;
    SampleGrid::from_vec(
        (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            })
            .collect(),
        width,
        height,
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn window_of<T: Sample>(grid: &SampleGrid<T>, radius: usize, x: usize, y: usize) -> Vec<T> {
    let r = radius as isize;
    let mut v = vec![];
    for dy in -r..=r {
        for dx in -r..=r {
            let sx = reflect_index(x as isize + dx, grid.width());
            let sy = reflect_index(y as isize + dy, grid.height());
            v.push(grid[(sx, sy)]);
        }
    }
    v
}

// Brute force rank filter: gather, sort, index
#[allow(dead_code)]
pub fn naive_rank<T: Sample>(grid: &SampleGrid<T>, config: &FilterConfig) -> SampleGrid<T> {
    SampleGrid::from_fn(grid.width(), grid.height(), |x, y| {
        let mut w = window_of(grid, config.radius(), x, y);
        w.sort_by(|a, b| a.sample_cmp(b));
        w[config.rank_index()]
    })
    .unwrap()
}

#[allow(dead_code)]
pub fn naive_mean<T: Sample>(grid: &SampleGrid<T>, radius: usize) -> SampleGrid<T> {
    SampleGrid::from_fn(grid.width(), grid.height(), |x, y| {
        let w = window_of(grid, radius, x, y);
        T::from_mean(w.iter().map(|v| v.to_f64()).sum::<f64>() / w.len() as f64)
    })
    .unwrap()
}
