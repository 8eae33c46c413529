use crate::domain::team::TeamEntry;
use crate::domain::trend::{apply_trends, previous_ranks, PreviousRanks};
use crate::storage::list_json_files;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub const ARCHIVES_SUBDIR: &str = "archives";

/// Most recent archive: the last `*.json` by file name. Names are
/// `YYYY-MM-DD.json`, so lexicographic order is chronological.
pub fn latest_archive(dir: &Path) -> anyhow::Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }
    Ok(list_json_files(dir)?.pop())
}

/// Rank mapping from the latest archive. A missing directory, an empty one,
/// or an unreadable latest file all mean "no history".
pub fn load_previous_ranks(dir: &Path) -> PreviousRanks {
    let latest = match latest_archive(dir) {
        Ok(Some(p)) => p,
        Ok(None) => {
            tracing::info!(archive_dir = %dir.display(), "no archived rankings; trends start at 0");
            return PreviousRanks::new();
        }
        Err(err) => {
            tracing::warn!(archive_dir = %dir.display(), error = %format!("{err:#}"), "cannot list archives; ignoring history");
            return PreviousRanks::new();
        }
    };

    match read_snapshot(&latest) {
        Ok(snapshot) => {
            let prev = previous_ranks(&snapshot);
            tracing::info!(archive = %latest.display(), teams = prev.len(), "loaded previous rankings");
            prev
        }
        Err(err) => {
            tracing::warn!(archive = %latest.display(), error = %format!("{err:#}"), "cannot read latest archive; ignoring history");
            PreviousRanks::new()
        }
    }
}

fn read_snapshot(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Attaches `trend` to every team against the latest archive in `archive_dir`.
/// Never fails.
pub fn compute_trends(teams: &mut [TeamEntry], archive_dir: &Path) {
    let previous = load_previous_ranks(archive_dir);
    apply_trends(teams, &previous);
}
