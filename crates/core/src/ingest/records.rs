use crate::domain::directory::TeamDirectory;
use crate::domain::team::RecordMap;
use crate::ingest::provider::{PowerRankMap, PowerRankProvider, WinLossMap, WinLossProvider};

const UNKNOWN: &str = "N/A";

/// Fetches both providers one after the other and combines them into
/// `"{win_loss}, TRank: {rank}"` for every team in the directory.
///
/// A provider that fails is logged and treated as having no data. When neither
/// provider returns anything the map is empty, which the caller treats as fatal.
pub async fn fetch_team_records(
    directory: &TeamDirectory,
    win_loss: &dyn WinLossProvider,
    power_ranks: &dyn PowerRankProvider,
) -> RecordMap {
    let wl = match win_loss.fetch_win_loss().await {
        Ok(m) => m,
        Err(err) => {
            tracing::warn!(provider = win_loss.provider_name(), error = %format!("{err:#}"), "win/loss fetch failed");
            WinLossMap::new()
        }
    };

    let pr = match power_ranks.fetch_power_ranks(directory).await {
        Ok(m) => m,
        Err(err) => {
            tracing::warn!(provider = power_ranks.provider_name(), error = %format!("{err:#}"), "power-rank fetch failed");
            PowerRankMap::new()
        }
    };

    tracing::info!(
        win_loss = wl.len(),
        power_ranks = pr.len(),
        teams = directory.ids().count(),
        "fetched team stats"
    );

    if wl.is_empty() && pr.is_empty() {
        return RecordMap::new();
    }

    combine_records(directory, &wl, &pr)
}

pub fn combine_records(
    directory: &TeamDirectory,
    win_loss: &WinLossMap,
    power_ranks: &PowerRankMap,
) -> RecordMap {
    let mut out = RecordMap::new();
    for id in directory.ids() {
        let record = win_loss.get(id).map(String::as_str).unwrap_or(UNKNOWN);
        let rank = power_ranks
            .get(id)
            .map(i64::to_string)
            .unwrap_or_else(|| UNKNOWN.to_string());
        out.insert(id.to_string(), format!("{record}, TRank: {rank}"));
    }
    out
}
