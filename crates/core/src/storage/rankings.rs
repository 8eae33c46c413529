use crate::domain::team::{TeamEntry, TemplateEntry};
use crate::storage::list_json_files;
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const TEMPLATE_FILE: &str = "template.json";

/// Files in the rankings directory that are never the active rankings list.
const AUXILIARY_SUFFIXES: [&str; 3] = [TEMPLATE_FILE, "mvps.json", "players.json"];

fn is_auxiliary(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| AUXILIARY_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}

/// Rankings candidates in `dir`: every `*.json` except the auxiliary files.
pub fn rankings_candidates(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    Ok(list_json_files(dir)?
        .into_iter()
        .filter(|p| !is_auxiliary(p))
        .collect())
}

/// The single active rankings file in `dir`. Zero or several candidates is an error.
pub fn discover_active_rankings(dir: &Path) -> anyhow::Result<PathBuf> {
    let mut candidates = rankings_candidates(dir)?;
    match candidates.len() {
        0 => anyhow::bail!("no active rankings file found in {}", dir.display()),
        1 => Ok(candidates.remove(0)),
        n => {
            let names: Vec<String> = candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            anyhow::bail!(
                "multiple rankings files found in {} ({n}): {}",
                dir.display(),
                names.join(", ")
            )
        }
    }
}

pub fn load_rankings(path: &Path) -> anyhow::Result<Vec<TeamEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rankings file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse rankings file {}", path.display()))
}

pub fn load_template(rankings_dir: &Path) -> anyhow::Result<Vec<TemplateEntry>> {
    let path = rankings_dir.join(TEMPLATE_FILE);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Serializes with 4-space indentation and a trailing newline.
pub fn to_pretty_json(teams: &[TeamEntry]) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    teams
        .serialize(&mut ser)
        .context("failed to serialize rankings")?;
    buf.push(b'\n');
    Ok(buf)
}

/// Overwrites `path` with `teams`. The bytes go to a sibling temp file first
/// and are renamed into place, so a failed write leaves the original intact.
pub fn write_rankings(path: &Path, teams: &[TeamEntry]) -> anyhow::Result<()> {
    let bytes = to_pretty_json(teams)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    std::fs::write(&tmp, &bytes)
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("failed to replace {}", path.display()));
    }
    Ok(())
}
