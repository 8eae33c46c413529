use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Number of teams in a complete rankings list.
pub const TEAM_COUNT: usize = 18;

/// Team id (lowercase) -> display record string. Built fresh on every run.
pub type RecordMap = BTreeMap<String, String>;

/// One row of a rankings file.
///
/// Only `id`, `rank`, `record` and `trend` are interpreted. Everything else
/// (name, logoUrl, blurb, ...) is carried through untouched in its original
/// key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub id: String,
    pub rank: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TeamEntry {
    pub fn new(id: impl Into<String>, rank: i64) -> Self {
        Self {
            id: id.into(),
            rank,
            record: None,
            trend: None,
            extra: Map::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }
}

/// Entry of `template.json`. Both fields are optional on the wire; entries
/// missing either are ignored when building a [`super::directory::TeamDirectory`].
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_fields_in_order() {
        let v = json!({
            "id": "iu",
            "rank": 3,
            "name": "Indiana",
            "logoUrl": "/logos/iu.png",
            "blurb": "Hot streak.",
            "record": "20-5 (10-2)"
        });

        let team: TeamEntry = serde_json::from_value(v).unwrap();
        assert_eq!(team.id, "iu");
        assert_eq!(team.rank, 3);
        assert_eq!(team.record.as_deref(), Some("20-5 (10-2)"));
        assert_eq!(team.trend, None);
        assert_eq!(team.name(), Some("Indiana"));

        let keys: Vec<&str> = team.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "logoUrl", "blurb"]);

        let out = serde_json::to_value(&team).unwrap();
        assert!(out.get("trend").is_none());
        assert_eq!(out["logoUrl"], "/logos/iu.png");
    }

    #[test]
    fn rejects_non_integer_rank() {
        let v = json!({"id": "iu", "rank": "3"});
        assert!(serde_json::from_value::<TeamEntry>(v).is_err());
    }
}
