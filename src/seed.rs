use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::store::TaskStore;

/// One entry of a seed file: either a bare title or a title with its flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SeedEntry {
    Title(String),
    Task {
        title: String,
        #[serde(default)]
        done: bool,
    },
}

impl SeedEntry {
    fn parts(&self) -> (&str, bool) {
        match self {
            Self::Title(title) => (title.as_str(), false),
            Self::Task { title, done } => (title.as_str(), *done),
        }
    }
}

pub fn demo() -> Vec<SeedEntry> {
    ["Write documentation", "Check PRs waiting for review", "Draft release notes"]
        .into_iter()
        .map(|t| SeedEntry::Title(t.to_owned()))
        .collect()
}

pub fn parse(json: &str) -> Result<Vec<SeedEntry>> {
    serde_json::from_str(json).context("seed file must be a JSON array of titles or tasks")
}

pub fn read(path: impl AsRef<Path>) -> Result<Vec<SeedEntry>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    parse(&raw).with_context(|| format!("invalid seed file {}", path.display()))
}

/// Adds every entry through the normal add path. Returns how many were added.
pub fn apply(store: &mut TaskStore, entries: &[SeedEntry]) -> usize {
    let mut added = 0;
    for entry in entries {
        let (title, done) = entry.parts();
        match store.add_task(title) {
            Ok(id) => {
                if done {
                    let _ = store.toggle_task_done(id);
                }
                added += 1;
            }
            Err(err) => warn!(%err, "seed entry skipped"),
        }
    }
    // The duplicate notice is meant for interactive adds only.
    store.dismiss();
    added
}
