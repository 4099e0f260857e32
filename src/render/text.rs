use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::Baseline;

use crate::error::MeasurementError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Sans,
    SansCondensed,
    Symbol,
    SerifItalic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub face: FontFace,
    /// Pixel height, also used as the line height.
    pub size: i32,
}

impl Font {
    pub const fn new(face: FontFace, size: i32) -> Self {
        Self { face, size }
    }
}

pub const BODY: Font = Font::new(FontFace::Sans, 12);
pub const SMALL: Font = Font::new(FontFace::Sans, 10);
pub const LARGE: Font = Font::new(FontFace::SansCondensed, 21);
pub const SYMBOL: Font = Font::new(FontFace::Symbol, 12);
pub const TITLE: Font = Font::new(FontFace::SerifItalic, 60);

/// Pixel width of a string in a font. Implemented by whatever owns the real font files.
pub trait TextMeasurer {
    fn text_width(&self, text: &str, font: Font) -> Result<i32, MeasurementError>;
}

/// ProFont faces from smallest to largest.
static PROFONTS: &[&MonoFont<'static>] = &[
    &profont::PROFONT_7_POINT,
    &profont::PROFONT_9_POINT,
    &profont::PROFONT_10_POINT,
    &profont::PROFONT_12_POINT,
    &profont::PROFONT_14_POINT,
    &profont::PROFONT_18_POINT,
    &profont::PROFONT_24_POINT,
];

/// Measures with the ProFont bitmap faces compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProFont;

impl ProFont {
    /// Largest face whose glyphs fit the font's line height, or the smallest face.
    pub fn face(font: Font) -> &'static MonoFont<'static> {
        let mut chosen: &'static MonoFont<'static> = &profont::PROFONT_7_POINT;
        for &face in PROFONTS {
            if face.character_size.height as i32 <= font.size {
                chosen = face;
            }
        }
        chosen
    }
}

impl TextMeasurer for ProFont {
    fn text_width(&self, text: &str, font: Font) -> Result<i32, MeasurementError> {
        if let Some(c) = text.chars().find(|c| c.is_control()) {
            return Err(MeasurementError::UnsupportedGlyph(c));
        }
        let style = MonoTextStyle::new(Self::face(font), BinaryColor::On);
        let width = style
            .measure_string(text, Point::zero(), Baseline::Top)
            .bounding_box
            .size
            .width;
        Ok(i32::try_from(width).unwrap_or(i32::MAX))
    }
}

/// Every glyph takes the same advance: three fifths of the font size, rounded.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAdvance;

#[cfg(test)]
impl FixedAdvance {
    pub const fn advance(font: Font) -> i32 {
        (font.size * 3 + 4) / 5
    }
}

#[cfg(test)]
impl TextMeasurer for FixedAdvance {
    fn text_width(&self, text: &str, font: Font) -> Result<i32, MeasurementError> {
        let mut glyphs = 0;
        for c in text.chars() {
            if c.is_control() {
                return Err(MeasurementError::UnsupportedGlyph(c));
            }
            glyphs += 1;
        }
        Ok(glyphs * Self::advance(font))
    }
}
