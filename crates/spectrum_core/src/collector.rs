use log::debug;

use crate::{Score, SpectrumError, TraitEntry, TraitSet, presets};

pub const MAX_FIXED_ROWS: usize = 20;

/// How input rows are provisioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowPolicy {
    /// Exactly this many rows, resized explicitly.
    Fixed(usize),
    /// A trailing blank row is kept; filling it in adds another.
    Growable,
}

/// When the chart picks up edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitMode {
    Live,
    OnSubmit,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraitRow {
    pub label: String,
    pub score: Score,
}

impl TraitRow {
    pub fn new(label: &str, score: Score) -> Self {
        Self {
            label: label.to_string(),
            score,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.label.trim().is_empty()
    }
}

/// Row-based trait input. Rows with blank labels are kept for editing but
/// never reach the renderer.
#[derive(Clone, Debug)]
pub struct TraitCollector {
    policy: RowPolicy,
    mode: SubmitMode,
    rows: Vec<TraitRow>,
    submitted: Option<TraitSet>,
    last_presets: Vec<String>,
}

impl TraitCollector {
    pub fn new(policy: RowPolicy, mode: SubmitMode) -> Result<Self, SpectrumError> {
        let rows = match policy {
            RowPolicy::Fixed(n) => {
                validate_row_count(n)?;
                vec![TraitRow::default(); n]
            }
            RowPolicy::Growable => vec![TraitRow::default()],
        };
        Ok(Self {
            policy,
            mode,
            rows,
            submitted: None,
            last_presets: Vec::new(),
        })
    }

    pub fn policy(&self) -> RowPolicy {
        self.policy
    }

    pub fn mode(&self) -> SubmitMode {
        self.mode
    }

    pub fn rows(&self) -> &[TraitRow] {
        &self.rows
    }

    pub fn set_label(&mut self, index: usize, text: &str) -> Result<(), SpectrumError> {
        self.check_index(index)?;
        self.rows[index].label = text.to_string();
        self.ensure_trailing_blank();
        Ok(())
    }

    pub fn set_score(&mut self, index: usize, score: Score) -> Result<(), SpectrumError> {
        self.check_index(index)?;
        self.rows[index].score = score;
        Ok(())
    }

    pub fn step_score(&mut self, index: usize, delta_steps: i32) -> Result<Score, SpectrumError> {
        self.check_index(index)?;
        let row = &mut self.rows[index];
        row.score = row.score.step(delta_steps);
        Ok(row.score)
    }

    pub fn delete_row(&mut self, index: usize) -> Result<TraitRow, SpectrumError> {
        if self.policy != RowPolicy::Growable {
            return Err(SpectrumError::UnsupportedForPolicy("delete_row"));
        }
        self.check_index(index)?;
        let removed = self.rows.remove(index);
        self.ensure_trailing_blank();
        debug!("deleted row {index} ({:?})", removed.label);
        Ok(removed)
    }

    pub fn set_row_count(&mut self, count: usize) -> Result<(), SpectrumError> {
        if !matches!(self.policy, RowPolicy::Fixed(_)) {
            return Err(SpectrumError::UnsupportedForPolicy("set_row_count"));
        }
        validate_row_count(count)?;
        self.rows.resize(count, TraitRow::default());
        self.policy = RowPolicy::Fixed(count);
        Ok(())
    }

    /// Adds newly selected preset traits as rows. Traits already present as a
    /// row label are skipped; an unchanged selection is a no-op. Returns the
    /// number of rows filled.
    pub fn apply_presets<S: AsRef<str>>(&mut self, selected: &[S]) -> usize {
        let selected: Vec<String> = selected.iter().map(|s| s.as_ref().trim().to_string()).collect();
        if selected == self.last_presets {
            return 0;
        }

        let mut added = 0;
        for name in &selected {
            if name.is_empty() || self.current_trait_set().contains_label(name) {
                continue;
            }
            let row = TraitRow::new(name, presets::lookup(name).unwrap_or_default());
            match self.policy {
                RowPolicy::Growable => {
                    let at = self.rows.len().saturating_sub(1);
                    self.rows.insert(at, row);
                    added += 1;
                }
                RowPolicy::Fixed(_) => {
                    if let Some(slot) = self.rows.iter_mut().find(|r| r.is_blank()) {
                        *slot = row;
                        added += 1;
                    }
                }
            }
        }
        self.ensure_trailing_blank();
        self.last_presets = selected;
        debug!("applied presets, {added} rows added");
        added
    }

    /// Rows with non-blank labels, in row order.
    pub fn current_trait_set(&self) -> TraitSet {
        self.rows
            .iter()
            .filter_map(|row| TraitEntry::new(&row.label, row.score).ok())
            .collect()
    }

    pub fn submit(&mut self) -> &TraitSet {
        self.submitted.insert(self.current_trait_set())
    }

    /// What the chart should show: live input, or the last submission.
    pub fn rendered_trait_set(&self) -> TraitSet {
        match self.mode {
            SubmitMode::Live => self.current_trait_set(),
            SubmitMode::OnSubmit => self.submitted.clone().unwrap_or_default(),
        }
    }

    fn ensure_trailing_blank(&mut self) {
        if self.policy != RowPolicy::Growable {
            return;
        }
        if self.rows.last().is_none_or(|r| !r.is_blank()) {
            self.rows.push(TraitRow::default());
        }
    }

    fn check_index(&self, index: usize) -> Result<(), SpectrumError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(SpectrumError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }
}

fn validate_row_count(count: usize) -> Result<(), SpectrumError> {
    if (1..=MAX_FIXED_ROWS).contains(&count) {
        Ok(())
    } else {
        Err(SpectrumError::InvalidRowCount(count))
    }
}
