use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::layout::ViewMode;

/// What a key press asks the preview to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SetMode(ViewMode),
    Reload,
    Today,
    NextPeriod,
    PrevPeriod,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(Action::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('m'), _) => Some(Action::SetMode(ViewMode::Month)),
            (KeyCode::Char('w'), _) => Some(Action::SetMode(ViewMode::Week)),
            (KeyCode::Char('r'), _) => Some(Action::Reload),
            (KeyCode::Char('t'), _) => Some(Action::Today),
            (KeyCode::Char(']'), _) | (KeyCode::Right, _) => Some(Action::NextPeriod),
            (KeyCode::Char('['), _) | (KeyCode::Left, _) => Some(Action::PrevPeriod),
            _ => None,
        }
    }
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Next key press that maps to an action, or `None` once `timeout` passes without input.
pub fn next_action(timeout: Duration) -> color_eyre::Result<Option<Action>> {
    loop {
        match poll_event(timeout)? {
            Some(Event::Key(key)) => match Action::from_key(key) {
                Some(action) => return Ok(Some(action)),
                None => continue,
            },
            Some(Event::Resize(..)) => return Ok(None),
            Some(_) => continue,
            None => return Ok(None),
        }
    }
}
