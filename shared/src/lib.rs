//! Wheel-of-fortune widget core: angle-to-result mapping, the spin animation
//! state machine, snapshot/restore and the host screen's panel state.

pub mod animation;
pub mod config;
pub mod constants;
pub mod error;
pub mod observable;
pub mod render;
pub mod screen;
pub mod segment;
pub mod snapshot;
pub mod wheel_widget;

pub use animation::{FixedTarget, Phase, RandomTargets, SpinTargetSource};
pub use config::WheelConfig;
pub use error::WheelError;
pub use render::{ArcCanvas, Orientation, Rect};
pub use screen::{ImageStatus, ScreenSnapshot, ScreenState};
pub use segment::{Segment, WheelValue};
pub use snapshot::WheelSnapshot;
pub use wheel_widget::WheelWidget;
