use serde::Deserialize;
use serde_json::Value;

/// Conference standings table as returned by the win/loss provider.
#[derive(Debug, Clone, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub data: Vec<StandingsTeam>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsTeam {
    #[serde(default)]
    pub alias: Option<String>,
    /// Loose list of single-stat objects; only the two record keys matter.
    #[serde(default)]
    pub data: Vec<StandingsStat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsStat {
    #[serde(default)]
    pub ovr_record: Option<String>,
    #[serde(default)]
    pub conf_record: Option<String>,
}

/// One row of the power-rank results file: `[rank, team_name, ...]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct TorvikRow(pub Vec<Value>);

impl TorvikRow {
    /// Rank in column 0. Accepts integers, whole floats and numeric strings.
    pub fn rank(&self) -> Option<i64> {
        match self.0.first()? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn team_name(&self) -> Option<&str> {
        self.0.get(1)?.as_str()
    }
}
