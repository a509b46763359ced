use serde::{Deserialize, Serialize};

use crate::segment::Color;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Square surfaces count as portrait.
    pub fn from_size(width: f32, height: f32) -> Self {
        if height >= width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Bounding box of the oval an arc is cut from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }
}

/// Drawing surface for the wheel. Angles are in degrees, measured clockwise
/// from 3 o'clock; every arc is a filled pie slice.
pub trait ArcCanvas {
    fn draw_arc(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCommand {
    pub oval: Rect,
    pub start_angle: f32,
    pub sweep_angle: f32,
    pub color: Color,
}

/// Records draw calls instead of painting them.
impl ArcCanvas for Vec<ArcCommand> {
    fn draw_arc(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32, color: Color) {
        self.push(ArcCommand {
            oval,
            start_angle,
            sweep_angle,
            color,
        });
    }
}
