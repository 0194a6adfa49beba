use std::cmp::Ordering;
use std::fmt::Debug;

/// A scalar sample type that the window filters can operate on.
///
/// Samples must be totally ordered. Floating point types use IEEE total
/// ordering, so NaN values sort after every finite value instead of poisoning
/// the rank selection.
pub trait Sample: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Name reported in logs and benchmark records.
    const TYPE_NAME: &'static str;

    /// Size of the dense alphabet for types that can index a histogram
    /// directly. `None` means the type is ordinal mapped first.
    const NATIVE_LEVELS: Option<usize>;

    fn sample_cmp(&self, other: &Self) -> Ordering;

    fn to_f64(self) -> f64;

    /// Converts a window mean back to the sample type. Integral types round
    /// to nearest and clamp to their range, real types keep the value as is.
    fn from_mean(v: f64) -> Self;

    /// Histogram bin for natively indexed types. Only meaningful when
    /// `NATIVE_LEVELS` is `Some`.
    fn level(self) -> usize;

    fn from_level(level: usize) -> Self;
}

impl Sample for u8 {
    const TYPE_NAME: &'static str = "u8";
    const NATIVE_LEVELS: Option<usize> = Some(256);

    fn sample_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_mean(v: f64) -> Self {
        v.round().clamp(0.0, u8::MAX as f64) as u8
    }

    fn level(self) -> usize {
        self as usize
    }

    fn from_level(level: usize) -> Self {
        level.min(u8::MAX as usize) as u8
    }
}

impl Sample for u16 {
    const TYPE_NAME: &'static str = "u16";
    const NATIVE_LEVELS: Option<usize> = None;

    fn sample_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_mean(v: f64) -> Self {
        v.round().clamp(0.0, u16::MAX as f64) as u16
    }

    fn level(self) -> usize {
        self as usize
    }

    fn from_level(level: usize) -> Self {
        level.min(u16::MAX as usize) as u16
    }
}

impl Sample for f32 {
    const TYPE_NAME: &'static str = "f32";
    const NATIVE_LEVELS: Option<usize> = None;

    fn sample_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_mean(v: f64) -> Self {
        v as f32
    }

    fn level(self) -> usize {
        self as usize
    }

    fn from_level(level: usize) -> Self {
        level as f32
    }
}

impl Sample for f64 {
    const TYPE_NAME: &'static str = "f64";
    const NATIVE_LEVELS: Option<usize> = None;

    fn sample_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn from_mean(v: f64) -> Self {
        v
    }

    fn level(self) -> usize {
        self as usize
    }

    fn from_level(level: usize) -> Self {
        level as f64
    }
}
