use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest width or height an element may ever have.
pub const MIN_ELEMENT_SIZE: f32 = 50.0;

/// Top-left anchor of an element in board-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_pos2(self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    /// Returns the position shifted by `delta`.
    pub fn offset(self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }
}

impl From<Pos2> for Position {
    fn from(pos: Pos2) -> Self {
        Self::new(pos.x, pos.y)
    }
}

impl From<Position> for Pos2 {
    fn from(position: Position) -> Self {
        position.to_pos2()
    }
}

/// Width and height of an element in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Floors both dimensions at [`MIN_ELEMENT_SIZE`].
    pub fn clamped(self) -> Self {
        Self::new(
            self.width.max(MIN_ELEMENT_SIZE),
            self.height.max(MIN_ELEMENT_SIZE),
        )
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<Vec2> for Size {
    fn from(vec: Vec2) -> Self {
        Self::new(vec.x, vec.y)
    }
}

/// Board-local rectangle covered by a box at `position` with `size`.
pub(crate) fn box_rect(position: Position, size: Size) -> Rect {
    Rect::from_min_size(position.to_pos2(), size.to_vec2())
}
