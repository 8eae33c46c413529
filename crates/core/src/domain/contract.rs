use crate::domain::team::{TeamEntry, TEAM_COUNT};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Structural invariant broken by a rankings list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    WrongCount { expected: usize, found: usize },
    DuplicateIds(Vec<String>),
    DuplicateRanks(Vec<i64>),
    RankSetMismatch { missing: Vec<i64>, unexpected: Vec<i64> },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongCount { expected, found } => {
                write!(f, "expected {expected} teams, found {found}")
            }
            Self::DuplicateIds(ids) => write!(f, "duplicate team ids: {}", ids.join(", ")),
            Self::DuplicateRanks(ranks) => write!(f, "duplicate rank values: {}", join(ranks)),
            Self::RankSetMismatch {
                missing,
                unexpected,
            } => write!(
                f,
                "ranks must be exactly 1-{TEAM_COUNT} (missing: [{}], unexpected: [{}])",
                join(missing),
                join(unexpected)
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks the four rankings-list invariants in order, stopping at the first
/// one that fails.
pub fn validate_rankings(teams: &[TeamEntry]) -> Result<(), ValidationError> {
    if teams.len() != TEAM_COUNT {
        return Err(ValidationError::WrongCount {
            expected: TEAM_COUNT,
            found: teams.len(),
        });
    }

    let dup_ids = duplicates(teams.iter().map(|t| t.id.clone()));
    if !dup_ids.is_empty() {
        return Err(ValidationError::DuplicateIds(dup_ids));
    }

    let dup_ranks = duplicates(teams.iter().map(|t| t.rank));
    if !dup_ranks.is_empty() {
        return Err(ValidationError::DuplicateRanks(dup_ranks));
    }

    let expected: BTreeSet<i64> = (1..=TEAM_COUNT as i64).collect();
    let seen: BTreeSet<i64> = teams.iter().map(|t| t.rank).collect();
    if seen != expected {
        return Err(ValidationError::RankSetMismatch {
            missing: expected.difference(&seen).copied().collect(),
            unexpected: seen.difference(&expected).copied().collect(),
        });
    }

    Ok(())
}

/// Predicate form of [`validate_rankings`]; logs the broken invariant.
pub fn is_valid(teams: &[TeamEntry]) -> bool {
    match validate_rankings(teams) {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(error = %err, "rankings validation failed");
            false
        }
    }
}

fn duplicates<T: Ord + Clone>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut counts = BTreeMap::<T, usize>::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(v, _)| v)
        .collect()
}

/// Rankings file name that is not `YYYY-MM-DD.json` or names an impossible date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    BadFormat { file_name: String },
    InvalidDate { file_name: String },
}

impl fmt::Display for FilenameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadFormat { file_name } => {
                write!(f, "filename '{file_name}' does not match format YYYY-MM-DD.json")
            }
            Self::InvalidDate { file_name } => {
                write!(f, "invalid calendar date in filename '{file_name}'")
            }
        }
    }
}

impl std::error::Error for FilenameError {}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})\.json$").expect("static filename pattern")
    })
}

/// Parses the snapshot date out of a rankings path. Only the final path
/// component is inspected.
pub fn parse_rankings_filename(path: &Path) -> Result<NaiveDate, FilenameError> {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    // \d also matches non-ASCII digits, which do not parse; treat those as format errors.
    let parts = filename_pattern().captures(&file_name).map(|caps| {
        (
            caps[1].parse::<i32>().ok(),
            caps[2].parse::<u32>().ok(),
            caps[3].parse::<u32>().ok(),
        )
    });
    let Some((Some(y), Some(m), Some(d))) = parts else {
        return Err(FilenameError::BadFormat { file_name });
    };

    NaiveDate::from_ymd_opt(y, m, d).ok_or(FilenameError::InvalidDate { file_name })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_list() -> Vec<TeamEntry> {
        let ids = [
            "iu", "osu", "msu", "mich", "pur", "ill", "wis", "minn", "neb", "nw", "psu", "rut",
            "md", "iowa", "ucla", "usc", "ore", "wash",
        ];
        ids.iter()
            .enumerate()
            .map(|(i, id)| TeamEntry::new(*id, i as i64 + 1))
            .collect()
    }

    #[test]
    fn accepts_complete_list() {
        let teams = valid_list();
        assert_eq!(validate_rankings(&teams), Ok(()));
        assert!(is_valid(&teams));
    }

    #[test]
    fn accepts_list_in_any_order() {
        let mut teams = valid_list();
        teams.reverse();
        assert!(validate_rankings(&teams).is_ok());
    }

    #[test]
    fn rejects_wrong_count() {
        let mut teams = valid_list();
        teams.pop();
        assert_eq!(
            validate_rankings(&teams),
            Err(ValidationError::WrongCount {
                expected: 18,
                found: 17
            })
        );
        assert!(!is_valid(&teams));
        assert!(!is_valid(&[]));
    }

    #[test]
    fn rejects_duplicate_id() {
        let mut teams = valid_list();
        teams[5].id = "iu".to_string();
        assert_eq!(
            validate_rankings(&teams),
            Err(ValidationError::DuplicateIds(vec!["iu".to_string()]))
        );
    }

    #[test]
    fn rejects_duplicate_rank() {
        let mut teams = valid_list();
        teams[17].rank = 1;
        assert_eq!(
            validate_rankings(&teams),
            Err(ValidationError::DuplicateRanks(vec![1]))
        );
    }

    #[test]
    fn rejects_rank_outside_range() {
        let mut teams = valid_list();
        teams[17].rank = 19;
        let err = validate_rankings(&teams).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RankSetMismatch {
                missing: vec![18],
                unexpected: vec![19]
            }
        );
        assert!(err.to_string().contains("missing: [18]"));

        let mut teams = valid_list();
        teams[0].rank = 0;
        assert!(!is_valid(&teams));
    }

    #[test]
    fn filename_accepts_real_dates() {
        assert_eq!(
            parse_rankings_filename(Path::new("2025-01-05.json")),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
        );
        assert_eq!(
            parse_rankings_filename(Path::new("rankings/2024-02-29.json")),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn filename_rejects_impossible_dates() {
        for name in ["2025-02-30.json", "2025-13-01.json", "2025-00-10.json", "2025-02-29.json"] {
            assert!(
                matches!(
                    parse_rankings_filename(Path::new(name)),
                    Err(FilenameError::InvalidDate { .. })
                ),
                "{name} should be rejected as an invalid date"
            );
        }
    }

    #[test]
    fn filename_rejects_bad_format() {
        for name in [
            "2025-1-5.json",
            "2025-01-05.JSON",
            "2025-01-05.json.bak",
            "x2025-01-05.json",
            "template.json",
            "",
        ] {
            assert!(
                matches!(
                    parse_rankings_filename(Path::new(name)),
                    Err(FilenameError::BadFormat { .. })
                ),
                "{name:?} should be rejected as bad format"
            );
        }
    }
}
