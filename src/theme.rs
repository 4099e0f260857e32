use ratatui::style::Color;
use serde::Deserialize;

use crate::profile::DisplayProfile;

pub const BLACK: Color = Color::Rgb(0, 0, 0);
pub const WHITE: Color = Color::Rgb(255, 255, 255);
pub const RED: Color = Color::Rgb(255, 0, 0);
pub const GREEN: Color = Color::Rgb(0, 255, 0);
pub const BLUE: Color = Color::Rgb(0, 0, 255);
pub const YELLOW: Color = Color::Rgb(255, 255, 0);

/// Colors for every semantic role on the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub label_bg: Color,
    pub weekday: Color,
    pub red_day: Color,
    pub week_number: Color,
    pub month_title: Color,
    pub month_outline: Color,
    pub lines: Color,
    pub today: Color,
    pub event_text: Color,
    /// Feed color drawn with a star bullet.
    pub star: Color,
    /// Feed color drawn with a heart bullet.
    pub heart: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            background: WHITE,
            label_bg: WHITE,
            weekday: BLACK,
            red_day: RED,
            week_number: RED,
            month_title: WHITE,
            month_outline: BLACK,
            lines: BLACK,
            today: RED,
            event_text: BLACK,
            star: GREEN,
            heart: RED,
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "mono" => Self::mono(),
            "ocean" => Self::ocean(),
            _ => Self::default(),
        }
    }

    fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            red_day: BLACK,
            week_number: BLACK,
            month_title: BLACK,
            month_outline: WHITE,
            today: BLACK,
            ..Self::default()
        }
    }

    fn ocean() -> Self {
        Self {
            name: "ocean".to_string(),
            week_number: BLUE,
            month_title: BLUE,
            month_outline: WHITE,
            lines: BLUE,
            today: YELLOW,
            ..Self::default()
        }
    }

    /// Map every color onto the panel palette.
    pub fn snapped(&self, profile: &DisplayProfile) -> Self {
        Self {
            name: self.name.clone(),
            background: profile.snap(self.background),
            label_bg: profile.snap(self.label_bg),
            weekday: profile.snap(self.weekday),
            red_day: profile.snap(self.red_day),
            week_number: profile.snap(self.week_number),
            month_title: profile.snap(self.month_title),
            month_outline: profile.snap(self.month_outline),
            lines: profile.snap(self.lines),
            today: profile.snap(self.today),
            event_text: profile.snap(self.event_text),
            star: profile.snap(self.star),
            heart: profile.snap(self.heart),
        }
    }

    /// Bullet glyph for a feed color.
    pub fn bullet(&self, color: Color) -> &'static str {
        if color == self.star {
            "\u{2605}"
        } else if color == self.heart {
            "\u{2764}"
        } else {
            "*"
        }
    }
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeConfig {
    preset: Option<String>,
    background: Option<String>,
    label_bg: Option<String>,
    weekday: Option<String>,
    red_day: Option<String>,
    week_number: Option<String>,
    month_title: Option<String>,
    month_outline: Option<String>,
    lines: Option<String>,
    today: Option<String>,
    event_text: Option<String>,
    star: Option<String>,
    heart: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let overrides = [
            (self.background, &mut theme.background),
            (self.label_bg, &mut theme.label_bg),
            (self.weekday, &mut theme.weekday),
            (self.red_day, &mut theme.red_day),
            (self.week_number, &mut theme.week_number),
            (self.month_title, &mut theme.month_title),
            (self.month_outline, &mut theme.month_outline),
            (self.lines, &mut theme.lines),
            (self.today, &mut theme.today),
            (self.event_text, &mut theme.event_text),
            (self.star, &mut theme.star),
            (self.heart, &mut theme.heart),
        ];
        for (value, slot) in overrides {
            let Some(value) = value else { continue };
            match parse_color(&value) {
                Some(c) => *slot = c,
                None => log::warn!("ignoring unknown theme color {:?}", value),
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(Color::Rgb(255, 128, 0)),
        "gray" | "grey" => Some(Color::Rgb(128, 128, 128)),
        _ => None,
    }
}
