//! Target panel description: resolution, palette and bit depth.

use ratatui::style::Color;

use crate::layout::Canvas;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayProfile {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub palette: Vec<Color>,
}

impl Default for DisplayProfile {
    fn default() -> Self {
        Self::inky_impression()
    }
}

impl DisplayProfile {
    /// Get a built-in profile by name.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "inky-impression" => Some(Self::inky_impression()),
            "tricolor" => Some(Self::tricolor()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    /// Seven-inch six-color panel.
    pub fn inky_impression() -> Self {
        Self {
            name: "inky-impression",
            width: 800,
            height: 480,
            palette: vec![
                Color::Rgb(0, 0, 0),
                Color::Rgb(255, 255, 255),
                Color::Rgb(255, 255, 0),
                Color::Rgb(255, 0, 0),
                Color::Rgb(0, 0, 255),
                Color::Rgb(0, 255, 0),
            ],
        }
    }

    pub fn tricolor() -> Self {
        Self {
            name: "tricolor",
            width: 800,
            height: 480,
            palette: vec![
                Color::Rgb(0, 0, 0),
                Color::Rgb(255, 255, 255),
                Color::Rgb(255, 0, 0),
            ],
        }
    }

    pub fn mono() -> Self {
        Self {
            name: "mono",
            width: 800,
            height: 480,
            palette: vec![Color::Rgb(0, 0, 0), Color::Rgb(255, 255, 255)],
        }
    }

    /// Bits per pixel needed to index the palette.
    pub fn bit_depth(&self) -> u32 {
        let colors = self.palette.len().max(2) as u32;
        u32::BITS - (colors - 1).leading_zeros()
    }

    /// Nearest palette entry by squared RGB distance.
    pub fn snap(&self, color: Color) -> Color {
        let (r, g, b) = rgb(color);
        self.palette
            .iter()
            .copied()
            .min_by_key(|&p| {
                let (pr, pg, pb) = rgb(p);
                let dr = r as i32 - pr as i32;
                let dg = g as i32 - pg as i32;
                let db = b as i32 - pb as i32;
                dr * dr + dg * dg + db * db
            })
            .unwrap_or(color)
    }

    pub fn month_canvas(&self) -> Canvas {
        Canvas::new(20, 65, self.width as i32 - 40, self.height as i32 - 85)
    }

    pub fn week_canvas(&self) -> Canvas {
        Canvas::new(20, 20, self.width as i32 - 40, self.height as i32 - 40)
    }
}

/// RGB components of a color, with the ANSI names mapped to their usual values.
pub fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        _ => (255, 255, 255),
    }
}
