use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::layout::ViewMode;

const STATUS_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let w = area.width as usize;

        let mode_str = match app.view_mode {
            ViewMode::Month => "[m]Month",
            ViewMode::Week => "[w]Week",
        };
        let profile = &app.profile;
        let left = format!(
            " {} {} {}x{} {}c/{}bpp theme:{} {} feeds {} events ",
            mode_str,
            profile.name,
            profile.width,
            profile.height,
            profile.palette.len(),
            profile.bit_depth(),
            app.theme_name(),
            app.feed_count(),
            app.event_count(),
        );

        let right = match &app.status_message {
            Some(msg) => format!(" {} ", msg),
            None if w >= left.len() + 48 => {
                " m/w:Mode [/]:Period t:Today r:Reload q:Quit ".to_string()
            }
            None => " q:Quit ".to_string(),
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, STATUS_STYLE),
            Span::styled(padding, STATUS_STYLE),
            Span::styled(right, STATUS_STYLE),
        ]);

        let bar = Paragraph::new(line).style(STATUS_STYLE);
        frame.render_widget(bar, area);
    }
}
