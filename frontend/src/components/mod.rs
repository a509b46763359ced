pub mod text_label;
pub mod wheel_canvas;

pub use text_label::TextLabel;
pub use wheel_canvas::{WheelCanvas, WheelHandle};
