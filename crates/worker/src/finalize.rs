use anyhow::Context;
use big18_core::domain::contract::{parse_rankings_filename, validate_rankings};
use big18_core::domain::directory::TeamDirectory;
use big18_core::domain::merge::merge_records;
use big18_core::ingest::provider::{PowerRankProvider, WinLossProvider};
use big18_core::ingest::records::fetch_team_records;
use big18_core::storage::{archive, rankings};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FinalizeOptions {
    pub rankings_dir: PathBuf,
    pub archive_dir: PathBuf,
    /// Run every step but leave the rankings file untouched.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct FinalizeSummary {
    pub path: PathBuf,
    pub as_of_date: NaiveDate,
    pub updated: usize,
    pub missing: Vec<String>,
    pub written: bool,
}

/// discover -> validate -> fetch -> merge -> trend -> validate -> write.
///
/// Any error aborts before the write, so the rankings file is only ever
/// replaced with a list that passed validation.
pub async fn run(
    opts: &FinalizeOptions,
    win_loss: &dyn WinLossProvider,
    power_ranks: &dyn PowerRankProvider,
) -> anyhow::Result<FinalizeSummary> {
    let path = rankings::discover_active_rankings(&opts.rankings_dir)
        .context("could not find active rankings file")?;
    let as_of_date = parse_rankings_filename(&path).context("filename validation failed")?;
    tracing::info!(path = %path.display(), %as_of_date, "found active rankings file");

    let mut teams = rankings::load_rankings(&path)?;
    validate_rankings(&teams).context("rankings validation failed")?;

    let template = rankings::load_template(&opts.rankings_dir)?;
    let directory = TeamDirectory::from_entries(&template);

    let records = fetch_team_records(&directory, win_loss, power_ranks).await;
    anyhow::ensure!(!records.is_empty(), "could not retrieve team records data");

    let report = merge_records(&mut teams, &records);
    archive::compute_trends(&mut teams, &opts.archive_dir);

    validate_rankings(&teams).context("rankings invalid after update")?;

    if opts.dry_run {
        tracing::info!(
            path = %path.display(),
            updated = report.updated,
            missing = report.missing.len(),
            dry_run = true,
            "skipping write"
        );
    } else {
        rankings::write_rankings(&path, &teams)
            .with_context(|| format!("error writing to rankings file {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            updated = report.updated,
            missing = report.missing.len(),
            "updated rankings with team records"
        );
    }

    Ok(FinalizeSummary {
        path,
        as_of_date,
        updated: report.updated,
        missing: report.missing,
        written: !opts.dry_run,
    })
}
