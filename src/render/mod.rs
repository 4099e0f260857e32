pub mod cell;
pub mod fit;
pub mod frame;
pub mod text;

use std::fmt;

use ratatui::style::Color;

use crate::layout::Bounds;

pub use frame::{FrameComposer, Scene};
pub use text::{Font, ProFont};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which point of the text box `position` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    LeftTop,
    MiddleTop,
}

/// One primitive for the rasterizer, in panel pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        bounds: Bounds,
        outline: Option<Color>,
        fill: Option<Color>,
        width: i32,
    },
    RoundedRect {
        bounds: Bounds,
        radius: i32,
        fill: Color,
    },
    Text {
        position: Point,
        text: String,
        font: Font,
        color: Color,
        anchor: Anchor,
    },
}

impl DrawCommand {
    pub fn outline(bounds: Bounds, color: Color, width: i32) -> Self {
        DrawCommand::Rect {
            bounds,
            outline: Some(color),
            fill: None,
            width,
        }
    }

    pub fn text(position: Point, text: impl Into<String>, font: Font, color: Color) -> Self {
        DrawCommand::Text {
            position,
            text: text.into(),
            font,
            color,
            anchor: Anchor::LeftTop,
        }
    }
}

#[cfg(test)]
impl DrawCommand {
    pub fn text_str(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Rect {
                bounds,
                outline,
                fill,
                width,
            } => write!(
                f,
                "rect {},{} {}x{} outline={:?} fill={:?} width={}",
                bounds.x, bounds.y, bounds.w, bounds.h, outline, fill, width
            ),
            DrawCommand::RoundedRect {
                bounds,
                radius,
                fill,
            } => write!(
                f,
                "rounded_rect {},{} {}x{} radius={} fill={:?}",
                bounds.x, bounds.y, bounds.w, bounds.h, radius, fill
            ),
            DrawCommand::Text {
                position,
                text,
                font,
                color,
                anchor,
            } => write!(
                f,
                "text {},{} {:?} {:?}/{} color={:?} {:?}",
                position.x, position.y, text, font.face, font.size, color, anchor
            ),
        }
    }
}
