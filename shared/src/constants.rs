// Wheel geometry
pub const START_ANGLE_DEGREES: f32 = -90.0; // 12 o'clock
pub const FULL_TURN_DEGREES: f32 = 360.0;

// Rewind run
pub const REWIND_TARGET_DEGREES: f32 = 2160.0; // 6 full turns, always reads as forward motion
pub const REWIND_DURATION_MS: i64 = 2000;

// Spin run
pub const SPIN_TARGET_MIN: u32 = 1081;
pub const SPIN_TARGET_MAX: u32 = 2160;
pub const SPIN_DURATION_MS: i64 = 5000;
pub const SPIN_START_DELAY_MS: i64 = 1000;

// Rendering insets, multiplied by the current scale
pub const PORTRAIT_MARGIN: f32 = 120.0;
pub const LANDSCAPE_MARGIN: f32 = 80.0;
pub const DEFAULT_SCALE: f32 = 0.5;

// Pointer arc
pub const POINTER_HALF_WIDTH: f32 = 100.0;
pub const POINTER_TOP_OVERHANG: f32 = 10.0;
pub const POINTER_DEPTH: f32 = 100.0;
