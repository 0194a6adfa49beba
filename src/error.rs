use thiserror::Error;

/// Errors returned by filter configuration and filter calls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("radius must be positive, got {0}")]
    InvalidRadius(usize),

    #[error("radius {radius} must be smaller than min(width, height) = {limit}")]
    RadiusTooLarge { radius: usize, limit: usize },

    #[error("gate must lie strictly between 0 and 1, got {0}")]
    InvalidGate(f64),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("buffer holds {actual} samples, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("destination is {dest_width}x{dest_height}, source is {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        dest_width: usize,
        dest_height: usize,
    },

    #[error("failed to allocate {0} elements of filter scratch space")]
    Allocation(usize),

    #[error("internal invariant broken: {0}")]
    Internal(&'static str),
}

pub type Result<T> = std::result::Result<T, FilterError>;

/// Allocates a vector of `len` copies of `fill`, reporting allocation failure
/// instead of aborting.
pub fn try_vec<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut v: Vec<T> = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| FilterError::Allocation(len))?;
    v.resize(len, fill);
    Ok(v)
}
