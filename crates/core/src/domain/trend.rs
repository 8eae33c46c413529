use crate::domain::team::TeamEntry;
use serde_json::Value;
use std::collections::HashMap;

/// Team id -> rank from the previous snapshot.
pub type PreviousRanks = HashMap<String, i64>;

/// Extracts `id -> rank` from a raw archive snapshot.
///
/// Archives are old files written by hand or by earlier versions, so rows are
/// read loosely: any row whose `id` is not a string or whose `rank` is not an
/// integer is skipped. A non-array document yields an empty mapping.
pub fn previous_ranks(snapshot: &Value) -> PreviousRanks {
    let mut out = PreviousRanks::new();
    let Some(rows) = snapshot.as_array() else {
        return out;
    };

    for row in rows {
        let id = row.get("id").and_then(Value::as_str);
        let rank = row.get("rank").and_then(Value::as_i64);
        if let (Some(id), Some(rank)) = (id, rank) {
            out.insert(id.to_string(), rank);
        }
    }
    out
}

/// Sets `trend = previous - current` on every team; teams without history get 0.
/// A delta that does not fit in an i64 (corrupt archive) also yields 0.
pub fn apply_trends(teams: &mut [TeamEntry], previous: &PreviousRanks) {
    for team in teams.iter_mut() {
        let trend = previous
            .get(&team.id)
            .and_then(|prev| prev.checked_sub(team.rank))
            .unwrap_or(0);
        team.trend = Some(trend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positive_trend_means_moved_up() {
        let mut teams = vec![TeamEntry::new("iu", 3), TeamEntry::new("osu", 5)];
        let previous = PreviousRanks::from([("iu".to_string(), 5), ("osu".to_string(), 3)]);

        apply_trends(&mut teams, &previous);

        assert_eq!(teams[0].trend, Some(2));
        assert_eq!(teams[1].trend, Some(-2));
    }

    #[test]
    fn new_or_renamed_team_gets_zero() {
        let mut teams = vec![TeamEntry::new("ucla", 7), TeamEntry::new("iu", 1)];
        let previous = PreviousRanks::from([("uc-la".to_string(), 9), ("iu".to_string(), 1)]);

        apply_trends(&mut teams, &previous);

        assert_eq!(teams[0].trend, Some(0));
        assert_eq!(teams[1].trend, Some(0));
    }

    #[test]
    fn empty_history_sets_every_trend_to_zero() {
        let mut teams = vec![TeamEntry::new("iu", 1), TeamEntry::new("osu", 2)];
        apply_trends(&mut teams, &PreviousRanks::new());
        assert!(teams.iter().all(|t| t.trend == Some(0)));
    }

    #[test]
    fn out_of_range_archive_rank_gives_zero_trend() {
        let previous = previous_ranks(&json!([
            {"id": "iu", "rank": i64::MIN},
            {"id": "osu", "rank": i64::MAX}
        ]));
        let mut teams = vec![TeamEntry::new("iu", 1), TeamEntry::new("osu", -1)];

        apply_trends(&mut teams, &previous);

        assert_eq!(teams[0].trend, Some(0));
        assert_eq!(teams[1].trend, Some(0));
    }

    #[test]
    fn previous_ranks_skips_malformed_rows() {
        let snapshot = json!([
            {"id": "iu", "rank": 4},
            {"id": 12, "rank": 2},
            {"id": "osu", "rank": "3"},
            {"id": "msu", "rank": 1.5},
            {"rank": 6},
            "not an object",
            {"id": "pur", "rank": 8, "name": "Purdue"}
        ]);

        let prev = previous_ranks(&snapshot);

        assert_eq!(prev.len(), 2);
        assert_eq!(prev.get("iu"), Some(&4));
        assert_eq!(prev.get("pur"), Some(&8));
    }

    #[test]
    fn previous_ranks_of_non_array_is_empty() {
        assert!(previous_ranks(&json!({"teams": []})).is_empty());
    }
}
