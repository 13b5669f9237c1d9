/// Persisted display preferences
///
/// This struct stores the subset of query parameters that survive a restart:
/// view mode, page size and sort order. It is serialized to JSON and
/// written to the settings store under a single fixed key.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::query::{QueryParameters, SortKey};
use super::settings::KeyValueStore;
use crate::error::PreferenceError;

/// Key of the preference record in the settings store
pub const PREFERENCES_KEY: &str = "archivePreferences";

/// How the gallery lays out the current page
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Wrapped cards
    #[default]
    Grid,
    /// One row per item
    List,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Grid => f.write_str("Grid"),
            ViewMode::List => f.write_str("List"),
        }
    }
}

/// Saved preference record
///
/// Every field is optional: a record written by an older version, or
/// edited by hand, may carry only some of them. Absent fields leave the
/// defaults untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<usize>,

    /// Unknown stored keys decode as `DateDesc`
    #[serde(default, rename = "sortBy", alias = "sortKey", skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<SortKey>,
}

impl Preferences {
    /// Snapshot of the current display settings
    pub fn capture(view_mode: ViewMode, params: &QueryParameters) -> Self {
        Self {
            view_mode: Some(view_mode),
            items_per_page: Some(params.items_per_page),
            sort_key: Some(params.sort_key),
        }
    }

    /// Convert to JSON string for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string (from storage)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the saved record.
    ///
    /// Returns None when nothing was ever saved, when the store can't be
    /// read, or when the stored record is corrupt.
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        let json = match store.get(PREFERENCES_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("⚠️  Could not read preferences: {}", e);
                return None;
            }
        };

        match Self::from_json(&json) {
            Ok(preferences) => Some(preferences),
            Err(e) => {
                tracing::warn!("⚠️  Ignoring corrupt preferences record: {}", e);
                None
            }
        }
    }

    /// Overwrite the saved record with this one
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), PreferenceError> {
        let json = self.to_json()?;
        store.set(PREFERENCES_KEY, &json)?;
        Ok(())
    }

    /// Merge present fields over the defaults
    pub fn apply(&self, view_mode: &mut ViewMode, params: &mut QueryParameters) {
        if let Some(mode) = self.view_mode {
            *view_mode = mode;
        }

        // A stored page size of 0 counts as absent
        if let Some(per_page) = self.items_per_page.filter(|n| *n > 0) {
            params.items_per_page = per_page;
        }

        if let Some(sort_key) = self.sort_key {
            params.sort_key = sort_key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::state::settings::MemoryStore;

    /// Every read fails
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn saved() -> Preferences {
        Preferences {
            view_mode: Some(ViewMode::List),
            items_per_page: Some(24),
            sort_key: Some(SortKey::NameAsc),
        }
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::default();
        saved().save(&mut store).unwrap();

        assert_eq!(Preferences::load(&store), Some(saved()));
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        assert_eq!(Preferences::load(&MemoryStore::default()), None);
    }

    #[test]
    fn test_read_failure_loads_nothing() {
        assert_eq!(Preferences::load(&UnreadableStore), None);
    }

    #[test]
    fn test_corrupt_record_loads_nothing() {
        let mut store = MemoryStore::default();
        store.set(PREFERENCES_KEY, "{\"viewMode\": \"gr").unwrap();
        assert_eq!(Preferences::load(&store), None);

        store.set(PREFERENCES_KEY, "{\"viewMode\": \"carousel\"}").unwrap();
        assert_eq!(Preferences::load(&store), None);
    }

    #[test]
    fn test_wire_format() {
        let json = saved().to_json().unwrap();
        assert_eq!(json, r#"{"viewMode":"list","itemsPerPage":24,"sortBy":"name-asc"}"#);

        let aliased = Preferences::from_json(r#"{"sortKey":"date-asc"}"#).unwrap();
        assert_eq!(aliased.sort_key, Some(SortKey::DateAsc));
    }

    #[test]
    fn test_unknown_sort_key_decodes_as_default() {
        let prefs = Preferences::from_json(r#"{"sortBy":"popularity"}"#).unwrap();
        assert_eq!(prefs.sort_key, Some(SortKey::DateDesc));
    }

    #[test]
    fn test_apply_merges_present_fields_only() {
        let mut view_mode = ViewMode::Grid;
        let mut params = QueryParameters::default();

        Preferences {
            items_per_page: Some(48),
            ..Preferences::default()
        }
        .apply(&mut view_mode, &mut params);

        assert_eq!(view_mode, ViewMode::Grid);
        assert_eq!(params.items_per_page, 48);
        assert_eq!(params.sort_key, SortKey::DateDesc);

        saved().apply(&mut view_mode, &mut params);
        assert_eq!(view_mode, ViewMode::List);
        assert_eq!(params.items_per_page, 24);
        assert_eq!(params.sort_key, SortKey::NameAsc);
    }

    #[test]
    fn test_zero_page_size_is_ignored() {
        let mut view_mode = ViewMode::Grid;
        let mut params = QueryParameters::default();

        Preferences::from_json(r#"{"itemsPerPage":0}"#)
            .unwrap()
            .apply(&mut view_mode, &mut params);

        assert_eq!(params.items_per_page, 12);
    }

    #[test]
    fn test_capture() {
        let params = QueryParameters {
            items_per_page: 24,
            sort_key: SortKey::NameAsc,
            ..QueryParameters::default()
        };
        assert_eq!(Preferences::capture(ViewMode::List, &params), saved());
    }
}
