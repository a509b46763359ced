use serde::{Deserialize, Serialize};

use crate::animation::Phase;
use crate::constants::DEFAULT_SCALE;
use crate::error::WheelError;

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

/// Serialized animation state of a wheel widget.
///
/// The phase is kept as its raw name so that an unrecognized value survives
/// deserialization and can be recovered from instead of failing the whole
/// snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WheelSnapshot {
    pub animation_status: String,
    pub angle: f32,
    #[serde(default)]
    pub elapsed_ms: i64,
    #[serde(default)]
    pub spin_to: Option<f32>,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl WheelSnapshot {
    pub fn phase(&self) -> Result<Phase, WheelError> {
        self.animation_status.parse()
    }

    pub fn to_json(&self) -> Result<String, WheelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, WheelError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for WheelSnapshot {
    fn default() -> Self {
        Self {
            animation_status: Phase::Idle.as_str().to_string(),
            angle: 0.0,
            elapsed_ms: 0,
            spin_to: None,
            scale: DEFAULT_SCALE,
        }
    }
}
