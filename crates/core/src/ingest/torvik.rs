use crate::config::Settings;
use crate::domain::directory::TeamDirectory;
use crate::ingest::provider::{build_http_client, get_json, PowerRankMap, PowerRankProvider};
use crate::ingest::types::TorvikRow;
use anyhow::Result;

/// Season team-results file carrying the external power rank ("TRank").
#[derive(Debug, Clone)]
pub struct TorvikClient {
    http: reqwest::Client,
    url: String,
}

impl TorvikClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            http: build_http_client(settings.http_timeout_secs)?,
            url: settings.torvik_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl PowerRankProvider for TorvikClient {
    fn provider_name(&self) -> &'static str {
        "torvik"
    }

    async fn fetch_power_ranks(&self, directory: &TeamDirectory) -> Result<PowerRankMap> {
        let rows: Vec<TorvikRow> = get_json(&self.http, &self.url, "torvik").await?;
        Ok(power_ranks_from_rows(&rows, directory))
    }
}

/// The results file abbreviates "State" as "St."; the template spells it out.
pub fn normalize_team_name(name: &str) -> String {
    name.replace("St.", "State")
}

/// Resolves each row's display name through the directory. Rows for teams
/// outside the directory, or without a usable rank, are dropped.
pub fn power_ranks_from_rows(rows: &[TorvikRow], directory: &TeamDirectory) -> PowerRankMap {
    let mut out = PowerRankMap::new();
    for row in rows {
        let Some(name) = row.team_name() else {
            continue;
        };
        let Some(id) = directory.id_for_name(&normalize_team_name(name)) else {
            continue;
        };
        let Some(rank) = row.rank() else {
            tracing::debug!(team_id = id, "power-rank row without a rank; skipping");
            continue;
        };
        out.insert(id.to_string(), rank);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::TemplateEntry;
    use serde_json::json;

    fn directory() -> TeamDirectory {
        let entries: Vec<TemplateEntry> = serde_json::from_value(json!([
            {"id": "msu", "name": "Michigan State"},
            {"id": "osu", "name": "Ohio State"},
            {"id": "iu", "name": "Indiana"}
        ]))
        .unwrap();
        TeamDirectory::from_entries(&entries)
    }

    #[test]
    fn expands_state_abbreviation() {
        assert_eq!(normalize_team_name("Michigan St."), "Michigan State");
        assert_eq!(normalize_team_name("Indiana"), "Indiana");
    }

    #[test]
    fn maps_rows_onto_team_ids() {
        let rows: Vec<TorvikRow> = serde_json::from_value(json!([
            [1, "Duke", "ACC"],
            [4, "Michigan St.", "B10"],
            [9, "Ohio St.", "B10"],
            [null, "Indiana", "B10"],
            [30]
        ]))
        .unwrap();

        let out = power_ranks_from_rows(&rows, &directory());
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("msu"), Some(&4));
        assert_eq!(out.get("osu"), Some(&9));
        assert!(!out.contains_key("iu"));
    }
}
