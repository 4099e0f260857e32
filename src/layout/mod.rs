pub mod grid;
pub mod span;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigurationError;

pub use grid::{GridCell, GridLayout};
pub use span::{events_for_day, DayEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
        }
    }
}

impl FromStr for ViewMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            _ => Err(ConfigurationError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drawing area for the grid, in panel pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Canvas {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Canvas {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn validate(self) -> Result<Self, ConfigurationError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigurationError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    pub fn bounds(self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// Axis-aligned box; `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }
}
