use crate::config::Settings;
use crate::ingest::provider::{build_http_client, get_json, WinLossMap, WinLossProvider};
use crate::ingest::types::StandingsResponse;
use anyhow::Result;

/// Conference standings endpoint (overall + conference win/loss per team).
#[derive(Debug, Clone)]
pub struct StandingsClient {
    http: reqwest::Client,
    url: String,
}

impl StandingsClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            http: build_http_client(settings.http_timeout_secs)?,
            url: settings.records_api_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl WinLossProvider for StandingsClient {
    fn provider_name(&self) -> &'static str {
        "standings"
    }

    async fn fetch_win_loss(&self) -> Result<WinLossMap> {
        let body: StandingsResponse = get_json(&self.http, &self.url, "standings").await?;
        Ok(win_loss_from_standings(&body))
    }
}

/// Formats `"{overall} ({conference})"` per lowercased alias. When a key shows
/// up more than once in a team's stats the last one wins. Teams missing an
/// alias or either record are skipped.
pub fn win_loss_from_standings(body: &StandingsResponse) -> WinLossMap {
    let mut out = WinLossMap::new();

    for team in &body.data {
        let Some(alias) = team.alias.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            tracing::warn!("standings row without alias; skipping");
            continue;
        };

        let mut overall: Option<&str> = None;
        let mut conference: Option<&str> = None;
        for stat in &team.data {
            if let Some(v) = stat.ovr_record.as_deref() {
                overall = Some(v);
            }
            if let Some(v) = stat.conf_record.as_deref() {
                conference = Some(v);
            }
        }

        match (overall, conference) {
            (Some(ovr), Some(conf)) => {
                out.insert(alias.to_lowercase(), format!("{ovr} ({conf})"));
            }
            _ => {
                tracing::warn!(
                    alias,
                    has_overall = overall.is_some(),
                    has_conference = conference.is_some(),
                    "standings row missing a record; skipping"
                );
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> StandingsResponse {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn formats_overall_and_conference_records() {
        let body = parse(json!({
            "data": [
                {"alias": "IU", "data": [{"conf_record": "10-2"}, {"ovr_record": "20-5"}]},
                {"alias": "osu", "data": [{"ovr_record": "18-7", "conf_record": "9-3"}]}
            ]
        }));

        let out = win_loss_from_standings(&body);
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("iu").map(String::as_str), Some("20-5 (10-2)"));
        assert_eq!(out.get("osu").map(String::as_str), Some("18-7 (9-3)"));
    }

    #[test]
    fn later_stat_overrides_earlier() {
        let body = parse(json!({
            "data": [
                {"alias": "MSU", "data": [
                    {"ovr_record": "1-0"},
                    {"conf_record": "0-0"},
                    {"ovr_record": "2-0"}
                ]}
            ]
        }));
        let out = win_loss_from_standings(&body);
        assert_eq!(out.get("msu").map(String::as_str), Some("2-0 (0-0)"));
    }

    #[test]
    fn skips_incomplete_rows() {
        let body = parse(json!({
            "data": [
                {"alias": "pur", "data": [{"ovr_record": "15-10"}]},
                {"data": [{"ovr_record": "1-1", "conf_record": "0-1"}]},
                {"alias": "  ", "data": [{"ovr_record": "1-1", "conf_record": "0-1"}]}
            ]
        }));
        assert!(win_loss_from_standings(&body).is_empty());
    }
}
