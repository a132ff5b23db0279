use serde::{Deserialize, Serialize};

use crate::{Score, SpectrumError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTraitEntry")]
pub struct TraitEntry {
    label: String,
    score: Score,
}

#[derive(Deserialize)]
struct RawTraitEntry {
    label: String,
    score: Score,
}

impl TryFrom<RawTraitEntry> for TraitEntry {
    type Error = SpectrumError;

    fn try_from(raw: RawTraitEntry) -> Result<Self, Self::Error> {
        TraitEntry::new(&raw.label, raw.score)
    }
}

impl TraitEntry {
    /// Stores the label trimmed; blank labels are rejected.
    pub fn new(label: &str, score: Score) -> Result<Self, SpectrumError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(SpectrumError::EmptyLabel);
        }
        Ok(Self {
            label: label.to_string(),
            score,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn score(&self) -> Score {
        self.score
    }
}

/// Ordered traits handed to the renderer. Order drives colour and label
/// placement only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitSet {
    entries: Vec<TraitEntry>,
}

impl TraitSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, SpectrumError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(label, value)| TraitEntry::new(label, Score::new(value)?))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn push(&mut self, entry: TraitEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TraitEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraitEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        let label = label.trim();
        self.entries.iter().any(|e| e.label == label)
    }

    /// Arithmetic mean of all scores, 0 for an empty set.
    pub fn mean(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let halves: i64 = self.entries.iter().map(|e| i64::from(e.score.halves())).sum();
        halves as f64 / (2.0 * self.entries.len() as f64)
    }
}

impl FromIterator<TraitEntry> for TraitSet {
    fn from_iter<T: IntoIterator<Item = TraitEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<TraitEntry> for TraitSet {
    fn extend<T: IntoIterator<Item = TraitEntry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TraitSet {
    type Item = &'a TraitEntry;
    type IntoIter = std::slice::Iter<'a, TraitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
