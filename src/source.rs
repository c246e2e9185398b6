//! Library snapshots: the already-fetched section listings the engine runs on.

use crate::error::Error;
use crate::model::{Section, SectionInput, SectionKind, TitleEntry};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// A section as stored in a snapshot file. `titles: null` or a non-empty
/// `error` marks a failed fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSnapshot {
    #[serde(flatten)]
    pub section: Section,
    #[serde(default)]
    pub titles: Option<Vec<TitleEntry>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SectionSnapshot {
    pub fn into_input(self) -> SectionInput {
        match (self.error, self.titles) {
            (Some(reason), _) => SectionInput::failed(self.section, reason),
            (None, Some(titles)) => SectionInput::fetched(self.section, titles),
            (None, None) => SectionInput::failed(self.section, "no listing returned"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionSnapshot>,
}

impl LibrarySnapshot {
    pub fn into_inputs(self) -> Vec<SectionInput> {
        self.sections
            .into_iter()
            .map(SectionSnapshot::into_input)
            .collect()
    }
}

pub fn load_snapshot(path: &Path) -> Result<LibrarySnapshot, Error> {
    let file = File::open(path)?;
    let snapshot: LibrarySnapshot = serde_json::from_reader(BufReader::new(file))?;
    debug!(
        "Loaded snapshot {} with {} sections",
        path.display(),
        snapshot.sections.len()
    );
    Ok(snapshot)
}

/// Picks the sections to reconcile.
///
/// With explicit `keys`, those sections are returned in the order given and
/// unknown keys are skipped with a warning. Otherwise every movie section is
/// returned, plus show sections when `include_shows` is set.
pub fn select_sections(
    inputs: Vec<SectionInput>,
    keys: &[String],
    include_shows: bool,
) -> Vec<SectionInput> {
    let keys: Vec<&str> = keys
        .iter()
        .map(|key| key.trim())
        .filter(|key| !key.is_empty())
        .collect();

    if keys.is_empty() {
        return inputs
            .into_iter()
            .filter(|input| match input.section.kind {
                SectionKind::Movie => true,
                SectionKind::Show => include_shows,
                SectionKind::Other => false,
            })
            .collect();
    }

    let mut pool: Vec<Option<SectionInput>> = inputs.into_iter().map(Some).collect();
    let mut selected = Vec::with_capacity(keys.len());
    for key in keys {
        let found = pool
            .iter_mut()
            .find(|slot| matches!(slot, Some(input) if input.section.key == key))
            .and_then(Option::take);
        match found {
            Some(input) => selected.push(input),
            None => warn!("Section '{}' not found in snapshot, skipping", key),
        }
    }
    selected
}
