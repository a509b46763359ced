use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::constants::*;
use crate::error::WheelError;

/// Tunables for a wheel widget. Every field has a default from `constants`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    /// Enables the back-spin phase and mid-animation resume.
    pub supports_resume: bool,
    pub start_angle: f32,
    pub rewind_target: f32,
    pub rewind_duration_ms: i64,
    pub spin_target_min: u32,
    pub spin_target_max: u32,
    pub spin_duration_ms: i64,
    pub spin_start_delay_ms: i64,
    pub portrait_margin: f32,
    pub landscape_margin: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            supports_resume: true,
            start_angle: START_ANGLE_DEGREES,
            rewind_target: REWIND_TARGET_DEGREES,
            rewind_duration_ms: REWIND_DURATION_MS,
            spin_target_min: SPIN_TARGET_MIN,
            spin_target_max: SPIN_TARGET_MAX,
            spin_duration_ms: SPIN_DURATION_MS,
            spin_start_delay_ms: SPIN_START_DELAY_MS,
            portrait_margin: PORTRAIT_MARGIN,
            landscape_margin: LANDSCAPE_MARGIN,
        }
    }
}

impl WheelConfig {
    /// The one-phase variant: no back-spin, no resume.
    pub fn simple() -> Self {
        Self {
            supports_resume: false,
            ..Self::default()
        }
    }

    pub fn spin_range(&self) -> RangeInclusive<u32> {
        self.spin_target_min..=self.spin_target_max
    }

    pub fn validate(&self) -> Result<(), WheelError> {
        if self.spin_target_min == 0 {
            return Err(WheelError::InvalidConfig(
                "spin_target_min must be greater than zero".to_string(),
            ));
        }
        if self.spin_target_min > self.spin_target_max {
            return Err(WheelError::InvalidConfig(format!(
                "spin range is inverted: {} > {}",
                self.spin_target_min, self.spin_target_max
            )));
        }
        Ok(())
    }
}
