use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::cell::DayCellRenderer;
use super::text::{TextMeasurer, TITLE};
use super::{Anchor, DrawCommand, Point};
use crate::calendar::ColoredEvent;
use crate::error::ConfigurationError;
use crate::layout::{Canvas, GridLayout, ViewMode};
use crate::theme::Theme;

/// A composed frame: everything the rasterizer needs, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub mode: ViewMode,
    pub commands: Vec<DrawCommand>,
}

/// Runs the grid layout and the cell renderer over a whole canvas.
pub struct FrameComposer<'a, M: TextMeasurer + ?Sized> {
    pub theme: &'a Theme,
    pub measurer: &'a M,
    pub max_events: usize,
    pub width: u32,
    pub height: u32,
}

impl<M: TextMeasurer + ?Sized> FrameComposer<'_, M> {
    pub fn compose(
        &self,
        mode: ViewMode,
        canvas: Canvas,
        reference: NaiveDate,
        today: NaiveDate,
        events: &[ColoredEvent],
        holidays: &BTreeSet<NaiveDate>,
    ) -> Result<Scene, ConfigurationError> {
        let layout = GridLayout::new(canvas)?;
        let renderer = DayCellRenderer::new(self.theme, self.measurer, self.max_events)?;
        let grid = layout.build(mode, reference, today, holidays);

        let mut commands = vec![DrawCommand::Rect {
            bounds: canvas.bounds(),
            outline: None,
            fill: Some(self.theme.background),
            width: 0,
        }];

        let mut skipped = 0;
        for cell in &grid.cells {
            let render = renderer.render(cell, events, mode);
            skipped += render.skipped;
            commands.extend(render.commands);
        }
        if skipped > 0 {
            log::info!("{} events could not be measured and were left out", skipped);
        }

        if let Some(cell) = grid.today() {
            commands.push(DrawCommand::outline(cell.bounds, self.theme.today, 2));
        }

        if mode == ViewMode::Month {
            let title = reference.format("%B %Y").to_string();
            let center = Point::new(canvas.x + canvas.width / 2, 5);
            commands.extend(self.outlined_title(&title, center));
        }

        log::debug!(
            "composed {} frame: {}x{} cells, {} commands",
            grid.mode,
            grid.columns,
            grid.rows,
            commands.len()
        );
        Ok(Scene {
            width: self.width,
            height: self.height,
            mode,
            commands,
        })
    }

    /// Eight offset copies in the outline color under the title itself.
    fn outlined_title(&self, title: &str, center: Point) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(9);
        for dx in [-1, 0, 1] {
            for dy in [-1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                commands.push(DrawCommand::Text {
                    position: Point::new(center.x + dx, center.y + dy),
                    text: title.to_string(),
                    font: TITLE,
                    color: self.theme.month_outline,
                    anchor: Anchor::MiddleTop,
                });
            }
        }
        commands.push(DrawCommand::Text {
            position: center,
            text: title.to_string(),
            font: TITLE,
            color: self.theme.month_title,
            anchor: Anchor::MiddleTop,
        });
        commands
    }
}
