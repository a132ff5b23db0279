use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use spectrum_core::{Score, SpectrumError, TraitEntry, TraitSet, presets};

/// Parses `LABEL=SCORE`. The last `=` splits, so labels may contain one.
pub fn parse_trait_arg(raw: &str) -> Result<TraitEntry, SpectrumError> {
    let Some((label, score)) = raw.rsplit_once('=') else {
        return Err(SpectrumError::InvalidScore(raw.to_string()));
    };
    let score: Score = score.parse()?;
    TraitEntry::new(label, score)
}

pub fn read_trait_file(path: &Path) -> Result<TraitSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read trait file {}", path.display()))?;
    let set: TraitSet = serde_json::from_str(&raw)
        .with_context(|| format!("invalid trait file {}", path.display()))?;
    info!("loaded {} traits from {}", set.len(), path.display());
    Ok(set)
}

/// Builds the trait set in order: file, presets, then explicit traits.
pub fn collect_traits(
    input: Option<&Path>,
    preset_refs: &[String],
    trait_args: &[String],
) -> Result<TraitSet> {
    let mut set = match input {
        Some(path) => read_trait_file(path)?,
        None => TraitSet::new(),
    };

    for reference in preset_refs {
        let entries =
            presets::resolve(reference).with_context(|| format!("--preset {reference}"))?;
        debug!("preset {reference:?} -> {} traits", entries.len());
        set.extend(entries);
    }

    for raw in trait_args {
        let entry = parse_trait_arg(raw).with_context(|| format!("--trait {raw}"))?;
        set.push(entry);
    }

    Ok(set)
}
