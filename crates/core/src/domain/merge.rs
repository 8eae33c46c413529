use crate::domain::team::{RecordMap, TeamEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub updated: usize,
    pub missing: Vec<String>,
}

/// Overwrites `record` on every team found in `records` (keyed by lowercase id).
///
/// Teams without a record keep whatever they had and produce a warning. Never
/// touches `id`, `rank` or the number of entries.
pub fn merge_records(teams: &mut [TeamEntry], records: &RecordMap) -> MergeReport {
    let mut report = MergeReport::default();

    for team in teams.iter_mut() {
        let key = team.id.to_lowercase();
        match records.get(&key) {
            Some(record) => {
                team.record = Some(record.clone());
                report.updated += 1;
            }
            None => {
                tracing::warn!(team_id = %key, "no record found for team");
                report.missing.push(key);
            }
        }
    }

    if !report.missing.is_empty() {
        tracing::warn!(
            missing = report.missing.len(),
            total = teams.len(),
            "record coverage incomplete"
        );
    }

    report
}
