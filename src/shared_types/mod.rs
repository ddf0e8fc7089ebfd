use serde::{Deserialize, Serialize};

/// Layer bounds in document pixel space: `y` grows downward, `x`/`y` are the
/// top-left corner.
#[derive(Copy, Clone, Deserialize, Serialize, Default, Debug, PartialEq)]
pub struct Rect {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl Rect {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center of the rect converted into rig space (y up, pixels).
    pub fn rig_center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: -self.bottom() + self.height / 2.0,
        }
    }
}

#[derive(Copy, Clone, Deserialize, Serialize, Default, Debug, PartialEq)]
pub struct Point {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

pub(crate) fn default_true() -> bool { true }
pub(crate) fn is_true(value: &bool) -> bool { *value }
pub(crate) fn is_zero(value: &f32) -> bool { *value == 0.0 }
