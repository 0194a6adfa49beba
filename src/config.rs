use crate::error::{self, FilterError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GATE: f64 = 0.5;

/// Window radius and rank gate shared by every filter variant.
///
/// The window side is `2 * radius + 1`. The gate is the fraction of the
/// window that must lie at or below the selected value, so a gate of 0.5
/// selects the median of odd sized windows.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    radius: usize,
    gate: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            radius: 1,
            gate: DEFAULT_GATE,
        }
    }
}

impl FilterConfig {
    pub fn new(radius: usize) -> error::Result<FilterConfig> {
        FilterConfig::with_gate(radius, DEFAULT_GATE)
    }

    pub fn with_gate(radius: usize, gate: f64) -> error::Result<FilterConfig> {
        let mut config = FilterConfig::default();
        config.set_radius(radius)?;
        config.set_gate(gate)?;
        Ok(config)
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn gate(&self) -> f64 {
        self.gate
    }

    pub fn set_radius(&mut self, radius: usize) -> error::Result<()> {
        if radius == 0 {
            return Err(FilterError::InvalidRadius(radius));
        }
        self.radius = radius;
        Ok(())
    }

    pub fn set_gate(&mut self, gate: f64) -> error::Result<()> {
        // NaN fails both comparisons
        if !(gate > 0.0 && gate < 1.0) {
            return Err(FilterError::InvalidGate(gate));
        }
        self.gate = gate;
        Ok(())
    }

    pub fn window_side(&self) -> usize {
        self.radius * 2 + 1
    }

    pub fn window_size(&self) -> usize {
        self.window_side() * self.window_side()
    }

    /// Position in the ascending window of the selected sample, `floor(k * gate)`.
    ///
    /// Always smaller than `window_size()` because the gate is below one.
    pub fn rank_index(&self) -> usize {
        let k = self.window_size();
        ((k as f64 * self.gate).floor() as usize).min(k - 1)
    }

    /// Checks the radius against the dimensions of a grid about to be filtered.
    pub fn validate_for(&self, width: usize, height: usize) -> error::Result<()> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions { width, height });
        }
        let limit = width.min(height);
        if self.radius >= limit {
            return Err(FilterError::RadiusTooLarge {
                radius: self.radius,
                limit,
            });
        }
        Ok(())
    }
}
