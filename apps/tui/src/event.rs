use crate::app::Action;
use crate::model::Focus;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Handles terminal events and maps them to application `Action`s.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Blocks until a key event is received or a timeout occurs.
    pub fn next(&self, focus: Focus) -> Result<Action> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(map_key(focus, key));
                }
            }
        }
        // If no key event, return a Tick action.
        Ok(Action::Tick)
    }
}

/// Maps a `KeyEvent` to a corresponding `Action` for the focused pane.
pub fn map_key(focus: Focus, key: KeyEvent) -> Action {
    match focus {
        Focus::EditLabel => match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::ExitEdit,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(ch) => Action::InputChar(ch),
            _ => Action::Tick,
        },
        Focus::Presets => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc | KeyCode::Char('p') => Action::TogglePresets,
            KeyCode::Down | KeyCode::Char('j') => Action::PresetNext,
            KeyCode::Up | KeyCode::Char('k') => Action::PresetPrev,
            KeyCode::Char(' ') | KeyCode::Enter => Action::TogglePresetItem,
            _ => Action::Tick,
        },
        Focus::Rows => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Down | KeyCode::Char('j') => Action::SelectNextRow,
            KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevRow,
            KeyCode::Right | KeyCode::Char('l') => Action::ScoreUp,
            KeyCode::Left | KeyCode::Char('h') => Action::ScoreDown,
            KeyCode::Enter | KeyCode::Char('e') => Action::EnterEdit,
            KeyCode::Char('d') | KeyCode::Delete => Action::DeleteRow,
            KeyCode::Char('+') | KeyCode::Char('n') => Action::AddRow,
            KeyCode::Char('-') => Action::RemoveRow,
            KeyCode::Char('p') => Action::TogglePresets,
            KeyCode::Char('s') => Action::Submit,
            KeyCode::Char('?') => Action::ToggleHelp,
            _ => Action::Tick,
        },
    }
}
