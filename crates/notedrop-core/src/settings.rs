//! Plugin settings: the persisted connection and behavior record.
//!
//! The host application owns persistence (it hands us whatever JSON it last
//! saved); loading merges that partial record over the defaults below, with
//! stored values winning per field. Updates replace the whole snapshot so
//! concurrent readers never observe a half-written record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Connection and behavior configuration for the upload pipeline.
///
/// Field names follow the persisted layout (`accessKeyId`, `bucketName`, …);
/// any field missing from a stored record falls back to its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Endpoint URL of the S3-compatible store, scheme included.
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    pub region: String,
    /// When set, public URLs are `{customDomain}/{key}` instead of the
    /// virtual-hosted-style URL derived from bucket and endpoint.
    pub custom_domain: String,
    /// Key prefix for uploaded objects; normalized to end in `/` at key
    /// construction time.
    pub path_prefix: String,
    /// Insert the four-digit current year as a subdirectory after the prefix.
    pub use_year_subdirectory: bool,
    /// Folder allow-list. Empty means uploads fire everywhere; otherwise the
    /// active file's path must sit inside one of these folders.
    pub enabled_folders: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            bucket_name: String::new(),
            region: "auto".to_string(),
            custom_domain: String::new(),
            path_prefix: "images/".to_string(),
            use_year_subdirectory: true,
            enabled_folders: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse a stored record, merging it over the defaults.
    ///
    /// `None` (nothing persisted yet) yields the defaults unchanged.
    pub fn from_stored(stored: Option<serde_json::Value>) -> Result<Self, serde_json::Error> {
        match stored {
            Some(value) => serde_json::from_value(value),
            None => Ok(Settings::default()),
        }
    }

    /// Serialize for host persistence.
    pub fn to_stored(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Names of the required connection fields that are empty, in
    /// declaration order, spelled as they appear in the persisted record.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.endpoint.trim().is_empty() {
            missing.push("endpoint");
        }
        if self.access_key_id.trim().is_empty() {
            missing.push("accessKeyId");
        }
        if self.secret_access_key.trim().is_empty() {
            missing.push("secretAccessKey");
        }
        if self.bucket_name.trim().is_empty() {
            missing.push("bucketName");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Folder allow-list gating for the active file's path.
    ///
    /// An empty list allows everything. Otherwise the path must equal a
    /// listed folder exactly or start with it followed by `/`.
    pub fn folder_allows(&self, path: &str) -> bool {
        if self.enabled_folders.is_empty() {
            return true;
        }
        self.enabled_folders.iter().any(|folder| {
            let folder = folder.trim_end_matches('/');
            if folder.is_empty() {
                return false;
            }
            path == folder || (path.starts_with(folder) && path[folder.len()..].starts_with('/'))
        })
    }
}

/// Snapshot holder for the current settings.
///
/// Readers take an `Arc<Settings>` and keep it for the duration of their
/// work; `replace` swaps in a new snapshot without touching in-flight
/// batches. Thread-safe and async-compatible using tokio's RwLock.
pub struct SettingsStore {
    current: RwLock<Arc<Settings>>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// Build a store from whatever the host last persisted.
    pub fn from_stored(stored: Option<serde_json::Value>) -> Result<Self, serde_json::Error> {
        Ok(Self::new(Settings::from_stored(stored)?))
    }

    /// The current snapshot. Cheap to clone, immutable once taken.
    pub async fn snapshot(&self) -> Arc<Settings> {
        self.current.read().await.clone()
    }

    /// Replace the snapshot wholesale. Returns the new snapshot so callers
    /// can persist it in the same breath.
    pub async fn replace(&self, settings: Settings) -> Arc<Settings> {
        let snapshot = Arc::new(settings);
        *self.current.write().await = snapshot.clone();
        snapshot
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_persisted_layout() {
        let settings = Settings::default();
        assert_eq!(settings.region, "auto");
        assert_eq!(settings.path_prefix, "images/");
        assert!(settings.use_year_subdirectory);
        assert!(settings.enabled_folders.is_empty());
        assert!(settings.endpoint.is_empty());
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let stored = json!({
            "endpoint": "https://s3.example.com",
            "bucketName": "notes",
            "useYearSubdirectory": false
        });
        let settings = Settings::from_stored(Some(stored)).unwrap();
        assert_eq!(settings.endpoint, "https://s3.example.com");
        assert_eq!(settings.bucket_name, "notes");
        assert!(!settings.use_year_subdirectory);
        // Missing fields fall back to defaults
        assert_eq!(settings.region, "auto");
        assert_eq!(settings.path_prefix, "images/");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let stored = json!({ "endpoint": "https://s3.example.com", "legacyField": 42 });
        let settings = Settings::from_stored(Some(stored)).unwrap();
        assert_eq!(settings.endpoint, "https://s3.example.com");
    }

    #[test]
    fn nothing_persisted_yields_defaults() {
        let settings = Settings::from_stored(None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn round_trip_preserves_field_names() {
        let settings = Settings {
            access_key_id: "AKIA".to_string(),
            ..Settings::default()
        };
        let value = settings.to_stored().unwrap();
        assert_eq!(value["accessKeyId"], "AKIA");
        assert_eq!(value["pathPrefix"], "images/");
    }

    #[test]
    fn missing_fields_are_enumerated_in_order() {
        let settings = Settings::default();
        assert_eq!(
            settings.missing_fields(),
            vec!["endpoint", "accessKeyId", "secretAccessKey", "bucketName"]
        );

        let settings = Settings {
            endpoint: "https://s3.example.com".to_string(),
            secret_access_key: "shh".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.missing_fields(), vec!["accessKeyId", "bucketName"]);
        assert!(!settings.is_complete());
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let settings = Settings {
            endpoint: "  ".to_string(),
            ..Settings::default()
        };
        assert!(settings.missing_fields().contains(&"endpoint"));
    }

    #[test]
    fn empty_folder_list_allows_everything() {
        let settings = Settings::default();
        assert!(settings.folder_allows("anywhere/note.md"));
    }

    #[test]
    fn folder_gating_requires_prefix_with_separator() {
        let settings = Settings {
            enabled_folders: vec!["docs".to_string()],
            ..Settings::default()
        };
        assert!(settings.folder_allows("docs/notes/a.md"));
        assert!(settings.folder_allows("docs"));
        assert!(!settings.folder_allows("other/a.md"));
        // Sibling folder sharing the prefix string is not inside "docs"
        assert!(!settings.folder_allows("docs-archive/a.md"));
    }

    #[test]
    fn trailing_slash_on_configured_folder_is_tolerated() {
        let settings = Settings {
            enabled_folders: vec!["docs/".to_string()],
            ..Settings::default()
        };
        assert!(settings.folder_allows("docs/a.md"));
        assert!(!settings.folder_allows("other/a.md"));
    }

    #[tokio::test]
    async fn replace_swaps_the_whole_snapshot() {
        let store = SettingsStore::default();
        let before = store.snapshot().await;

        let updated = Settings {
            bucket_name: "notes".to_string(),
            ..Settings::default()
        };
        store.replace(updated).await;

        let after = store.snapshot().await;
        assert_eq!(after.bucket_name, "notes");
        // The snapshot taken before the update is untouched
        assert!(before.bucket_name.is_empty());
    }
}
