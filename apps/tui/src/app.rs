use anyhow::Result;
use log::{debug, info};
use spectrum_core::{RowPolicy, SpectrumError, SubmitMode, TraitSet};

use crate::model::{AppState, Focus};

/// Represents actions that can be dispatched to the App.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Tick,
    SelectNextRow,
    SelectPrevRow,
    ScoreUp,
    ScoreDown,
    EnterEdit,
    ExitEdit,
    InputChar(char),
    Backspace,
    DeleteRow,
    AddRow,
    RemoveRow,
    TogglePresets,
    PresetNext,
    PresetPrev,
    TogglePresetItem,
    Submit,
    ToggleHelp,
}

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(policy: RowPolicy, mode: SubmitMode) -> Result<Self> {
        Ok(Self {
            state: AppState::new(policy, mode)?,
        })
    }

    pub fn init(&mut self) -> Result<()> {
        self.state.push_log("Application initialized.");
        info!(
            "tui started with {:?} rows, {:?} mode",
            self.state.collector.policy(),
            self.state.collector.mode()
        );
        Ok(())
    }

    /// The trait set the chart should currently show.
    pub fn chart_traits(&self) -> TraitSet {
        self.state.collector.rendered_trait_set()
    }

    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!("dispatch {action:?}");
        let outcome = self.apply(action);
        if let Err(err) = outcome {
            // recoverable input problems surface in the log pane
            self.state.push_log(format!("Error: {err}"));
        }
        self.state.clamp_selection();
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<(), SpectrumError> {
        let row = self.state.selected_row;
        match action {
            Action::Quit => self.state.quit(),
            Action::Tick => {}
            Action::SelectNextRow => {
                let len = self.state.collector.rows().len();
                if len > 0 {
                    self.state.selected_row = (row + 1) % len;
                }
            }
            Action::SelectPrevRow => {
                let len = self.state.collector.rows().len();
                if len > 0 {
                    self.state.selected_row = if row == 0 { len - 1 } else { row - 1 };
                }
            }
            Action::ScoreUp => {
                self.state.collector.step_score(row, 1)?;
            }
            Action::ScoreDown => {
                self.state.collector.step_score(row, -1)?;
            }
            Action::EnterEdit => self.state.focus = Focus::EditLabel,
            Action::ExitEdit => self.state.focus = Focus::Rows,
            Action::InputChar(ch) => {
                let mut label = self.current_label();
                label.push(ch);
                self.state.collector.set_label(row, &label)?;
            }
            Action::Backspace => {
                let mut label = self.current_label();
                label.pop();
                self.state.collector.set_label(row, &label)?;
            }
            Action::DeleteRow => {
                let removed = self.state.collector.delete_row(row)?;
                if !removed.is_blank() {
                    self.state.push_log(format!("Deleted {:?}.", removed.label.trim()));
                }
            }
            Action::AddRow => self.resize_rows(1)?,
            Action::RemoveRow => self.resize_rows(-1)?,
            Action::TogglePresets => {
                self.state.focus = match self.state.focus {
                    Focus::Presets => Focus::Rows,
                    _ => Focus::Presets,
                };
            }
            Action::PresetNext => {
                let len = self.state.preset_items.len();
                if len > 0 {
                    self.state.preset_cursor = (self.state.preset_cursor + 1) % len;
                }
            }
            Action::PresetPrev => {
                let len = self.state.preset_items.len();
                if len > 0 {
                    let cursor = self.state.preset_cursor;
                    self.state.preset_cursor = if cursor == 0 { len - 1 } else { cursor - 1 };
                }
            }
            Action::TogglePresetItem => self.toggle_preset(),
            Action::Submit => {
                if self.state.collector.mode() == SubmitMode::OnSubmit {
                    let count = self.state.collector.submit().len();
                    self.state.push_log(format!("Submitted {count} traits."));
                }
            }
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
        }
        Ok(())
    }

    fn current_label(&self) -> String {
        self.state
            .collector
            .rows()
            .get(self.state.selected_row)
            .map(|r| r.label.clone())
            .unwrap_or_default()
    }

    fn resize_rows(&mut self, delta: isize) -> Result<(), SpectrumError> {
        let RowPolicy::Fixed(current) = self.state.collector.policy() else {
            return Err(SpectrumError::UnsupportedForPolicy("resizing rows"));
        };
        let target = current.saturating_add_signed(delta);
        self.state.collector.set_row_count(target)?;
        self.state.push_log(format!("Number of traits: {target}."));
        Ok(())
    }

    fn toggle_preset(&mut self) {
        let Some(item) = self.state.preset_items.get(self.state.preset_cursor).cloned() else {
            return;
        };
        if self.state.is_preset_selected(&item) {
            self.state.preset_selection.retain(|s| s.as_str() != item.name);
        } else {
            self.state.preset_selection.push(item.name.to_string());
        }
        let added = self
            .state
            .collector
            .apply_presets(self.state.preset_selection.as_slice());
        if added > 0 {
            self.state
                .push_log(format!("Added {added} preset trait(s) from {}.", item.group));
        }
    }
}
