use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter variants that can be selected by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMethod {
    Mean,
    Histogram,
    TwoLevel,
    LocalSort,
}

impl FilterMethod {
    pub fn all() -> [FilterMethod; 4] {
        [
            FilterMethod::Mean,
            FilterMethod::Histogram,
            FilterMethod::TwoLevel,
            FilterMethod::LocalSort,
        ]
    }

    pub fn is_median(&self) -> bool {
        !matches!(self, FilterMethod::Mean)
    }
}

impl FromStr for FilterMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mean" | "box" => Ok(FilterMethod::Mean),
            "histogram" | "hist" => Ok(FilterMethod::Histogram),
            "twolevel" | "two-level" | "o1" => Ok(FilterMethod::TwoLevel),
            "localsort" | "local-sort" | "sort" => Ok(FilterMethod::LocalSort),
            _ => Err(anyhow!("Invalid filter method: {}", s)),
        }
    }
}

impl fmt::Display for FilterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterMethod::Mean => "mean",
            FilterMethod::Histogram => "histogram",
            FilterMethod::TwoLevel => "twolevel",
            FilterMethod::LocalSort => "localsort",
        };
        write!(f, "{}", s)
    }
}

// Sample storage types the harness knows how to synthesize from an 8-bit image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleType {
    U8,
    U16,
    F32,
    F64,
}

impl FromStr for SampleType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "u8" | "uchar" => Ok(SampleType::U8),
            "u16" => Ok(SampleType::U16),
            "f32" | "float" => Ok(SampleType::F32),
            "f64" | "double" => Ok(SampleType::F64),
            _ => Err(anyhow!("Invalid sample type: {}", s)),
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SampleType::U8 => "u8",
            SampleType::U16 => "u16",
            SampleType::F32 => "f32",
            SampleType::F64 => "f64",
        };
        write!(f, "{}", s)
    }
}
