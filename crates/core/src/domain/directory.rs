use crate::domain::team::TemplateEntry;
use std::collections::{BTreeMap, BTreeSet};

/// Team ids from the template, plus a display name -> id lookup.
///
/// Every entry with an id is a team, named or not. Duplicate names resolve
/// last-write-wins; that has not been checked against real template data, so
/// collisions are logged rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    ids: BTreeSet<String>,
    by_name: BTreeMap<String, String>,
}

impl TeamDirectory {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a TemplateEntry>) -> Self {
        let mut ids = BTreeSet::new();
        let mut by_name = BTreeMap::new();
        for entry in entries {
            let Some(id) = entry.id.as_deref().filter(|s| !s.is_empty()) else {
                continue;
            };
            ids.insert(id.to_string());

            let Some(name) = entry.name.as_deref() else {
                continue;
            };
            if let Some(prev) = by_name.insert(name.to_string(), id.to_string()) {
                tracing::debug!(
                    team_name = name,
                    previous_id = %prev,
                    team_id = id,
                    "duplicate template name; later entry wins"
                );
            }
        }
        Self { ids, by_name }
    }

    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Every distinct team id in the template.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
