use spectrum_core::{RowPolicy, SpectrumError, SubmitMode, TraitCollector, presets};

const MAX_LOG_LINES: usize = 50;

/// Which part of the screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Rows,
    EditLabel,
    Presets,
}

/// One selectable entry in the preset picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetItem {
    pub group: &'static str,
    pub name: &'static str,
}

pub fn preset_items() -> Vec<PresetItem> {
    presets::groups()
        .iter()
        .flat_map(|g| {
            g.traits.iter().map(move |&(name, _)| PresetItem {
                group: g.name,
                name,
            })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub is_running: bool,
    pub collector: TraitCollector,
    pub selected_row: usize,
    pub focus: Focus,
    pub preset_items: Vec<PresetItem>,
    pub preset_cursor: usize,
    /// Selected preset trait names, in the order they were picked.
    pub preset_selection: Vec<String>,
    pub show_help: bool,
    pub logs: Vec<String>,
}

impl AppState {
    pub fn new(policy: RowPolicy, mode: SubmitMode) -> Result<Self, SpectrumError> {
        Ok(Self {
            is_running: true,
            collector: TraitCollector::new(policy, mode)?,
            selected_row: 0,
            focus: Focus::Rows,
            preset_items: preset_items(),
            preset_cursor: 0,
            preset_selection: Vec::new(),
            show_help: false,
            logs: Vec::new(),
        })
    }

    pub fn quit(&mut self) {
        self.is_running = false;
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
        if self.logs.len() > MAX_LOG_LINES {
            let excess = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(..excess);
        }
    }

    /// Keeps the row cursor valid after rows were removed.
    pub fn clamp_selection(&mut self) {
        let len = self.collector.rows().len();
        if self.selected_row >= len {
            self.selected_row = len.saturating_sub(1);
        }
    }

    pub fn is_preset_selected(&self, item: &PresetItem) -> bool {
        self.preset_selection.iter().any(|s| s.as_str() == item.name)
    }
}
