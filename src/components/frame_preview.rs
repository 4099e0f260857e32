use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
    Frame,
};

use crate::layout::Bounds;
use crate::render::{Anchor, DrawCommand, Scene};

/// Terminal rendition of a scene, scaled from panel pixels to cells.
pub struct FramePreview<'a> {
    scene: &'a Scene,
}

impl<'a> FramePreview<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    pub fn draw(frame: &mut Frame, area: Rect, scene: Option<&Scene>) {
        let title = match scene {
            Some(scene) => format!(" {} {}x{} ", scene.mode, scene.width, scene.height),
            None => " no frame ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().add_modifier(Modifier::DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if let Some(scene) = scene {
            frame.render_widget(FramePreview::new(scene), inner);
        }
    }

    fn column(&self, area: Rect, x: i32) -> u16 {
        scale(x, self.scene.width, area.width) + area.x
    }

    fn row(&self, area: Rect, y: i32) -> u16 {
        scale(y, self.scene.height, area.height) + area.y
    }

    fn fill(&self, area: Rect, buf: &mut Buffer, bounds: Bounds, style: Style) {
        let (left, top) = (self.column(area, bounds.x), self.row(area, bounds.y));
        let (right, bottom) = (
            self.column(area, bounds.right()).min(area.right()),
            self.row(area, bounds.bottom()).min(area.bottom()),
        );
        for y in top..bottom {
            for x in left..right {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(style);
                }
            }
        }
    }

    fn outline(&self, area: Rect, buf: &mut Buffer, bounds: Bounds, style: Style) {
        let left = self.column(area, bounds.x);
        let top = self.row(area, bounds.y);
        let right = self.column(area, bounds.right()).min(area.right().saturating_sub(1));
        let bottom = self.row(area, bounds.bottom()).min(area.bottom().saturating_sub(1));
        if right <= left || bottom <= top {
            return;
        }

        let mut put = |x: u16, y: u16, symbol: &str| {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        };
        for x in left + 1..right {
            put(x, top, "\u{2500}");
            put(x, bottom, "\u{2500}");
        }
        for y in top + 1..bottom {
            put(left, y, "\u{2502}");
            put(right, y, "\u{2502}");
        }
        put(left, top, "\u{250c}");
        put(right, top, "\u{2510}");
        put(left, bottom, "\u{2514}");
        put(right, bottom, "\u{2518}");
    }
}

impl Widget for FramePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.scene.width == 0 || self.scene.height == 0 {
            return;
        }

        for command in &self.scene.commands {
            match command {
                DrawCommand::Rect {
                    bounds,
                    outline,
                    fill,
                    width,
                } => {
                    if let Some(fill) = fill {
                        self.fill(area, buf, *bounds, Style::default().bg(*fill));
                    }
                    if let Some(outline) = outline {
                        let mut style = Style::default().fg(*outline);
                        if *width > 1 {
                            style = style.add_modifier(Modifier::BOLD);
                        }
                        self.outline(area, buf, *bounds, style);
                    }
                }
                // Label backgrounds have no useful terminal equivalent.
                DrawCommand::RoundedRect { .. } => {}
                DrawCommand::Text {
                    position,
                    text,
                    color,
                    anchor,
                    ..
                } => {
                    let mut x = self.column(area, position.x);
                    if *anchor == Anchor::MiddleTop {
                        x = x.saturating_sub(text.chars().count() as u16 / 2).max(area.x);
                    }
                    let y = self.row(area, position.y);
                    if y >= area.bottom() || x >= area.right() {
                        continue;
                    }
                    let room = (area.right() - x) as usize;
                    buf.set_stringn(x, y, text, room, Style::default().fg(*color));
                }
            }
        }
    }
}

fn scale(value: i32, extent: u32, cells: u16) -> u16 {
    let value = value.clamp(0, extent as i32) as u64;
    (value * cells as u64 / extent as u64) as u16
}
