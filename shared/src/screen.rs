use serde::{Deserialize, Serialize};

use crate::error::WheelError;
use crate::segment::WheelValue;
use crate::snapshot::WheelSnapshot;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageStatus {
    #[default]
    None,
    Loaded,
}

/// What the host screen shows next to the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenState {
    pub text_visible: bool,
    pub image_status: ImageStatus,
    pub last_result: WheelValue,
    /// Bumped on every eviction so the next load bypasses any cached copy.
    pub image_revision: u32,
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reacts to a published wheel value. Returns whether anything changed.
    pub fn on_wheel_value(&mut self, value: WheelValue) -> bool {
        match value {
            WheelValue::Text => {
                self.last_result = value;
                self.text_visible = true;
                true
            }
            WheelValue::Picture => {
                self.last_result = value;
                self.evict_image();
                self.image_status = ImageStatus::Loaded;
                true
            }
            WheelValue::None => false,
        }
    }

    /// Hides the text panel and drops the image.
    pub fn clear(&mut self) {
        self.evict_image();
        self.image_status = ImageStatus::None;
        self.text_visible = false;
    }

    fn evict_image(&mut self) {
        self.image_revision = self.image_revision.wrapping_add(1);
    }

    pub fn image_url(&self, base_url: &str) -> Option<String> {
        match self.image_status {
            ImageStatus::Loaded => {
                let separator = if base_url.contains('?') { '&' } else { '?' };
                Some(format!("{}{}r={}", base_url, separator, self.image_revision))
            }
            ImageStatus::None => None,
        }
    }

    pub fn snapshot(&self, wheel: WheelSnapshot) -> ScreenSnapshot {
        ScreenSnapshot {
            wheel,
            text_visible: self.text_visible,
            image_status: self.image_status,
            last_result: self.last_result,
            image_revision: self.image_revision,
        }
    }

    /// Rebuilds the panel state. The revision is kept so a loaded image is
    /// requested under the same URL and comes from cache.
    pub fn restore(snapshot: &ScreenSnapshot) -> Self {
        Self {
            text_visible: snapshot.text_visible,
            image_status: snapshot.image_status,
            last_result: snapshot.last_result,
            image_revision: snapshot.image_revision,
        }
    }
}

/// Everything the host saves across a reload: the wheel's own snapshot plus
/// the panel state it owns.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ScreenSnapshot {
    pub wheel: WheelSnapshot,
    #[serde(default)]
    pub text_visible: bool,
    #[serde(default)]
    pub image_status: ImageStatus,
    #[serde(default)]
    pub last_result: WheelValue,
    #[serde(default)]
    pub image_revision: u32,
}

impl ScreenSnapshot {
    pub fn to_json(&self) -> Result<String, WheelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, WheelError> {
        Ok(serde_json::from_str(json)?)
    }
}
