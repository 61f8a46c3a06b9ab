//! User profile and display settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::error::Result;

/// The local user's profile and settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Local user name.
    pub username: String,
    /// Whether the status bar clock uses 24-hour time.
    #[serde(default = "default_time_24")]
    pub time_24: bool,
    /// Nicknames for network interfaces, keyed by interface name.
    #[serde(default)]
    pub nic_nicknames: BTreeMap<String, String>,
    /// When setup was completed.
    pub created_at: DateTime<Utc>,
}

fn default_time_24() -> bool {
    true
}

impl Profile {
    /// Create a profile with default settings.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            time_24: default_time_24(),
            nic_nicknames: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the clock format.
    pub fn with_time_24(mut self, time_24: bool) -> Self {
        self.time_24 = time_24;
        self
    }

    /// Display name for an interface: its nickname, else its own name.
    pub fn nic_label<'a>(&'a self, ifname: &'a str) -> &'a str {
        self.nic_nicknames
            .get(ifname)
            .map(String::as_str)
            .unwrap_or(ifname)
    }
}

/// Stores the [`Profile`] as a single JSON file.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, or `None` if setup has not been completed.
    pub fn load(&self) -> Result<Option<Profile>> {
        read_json_optional(&self.path)
    }

    /// Whether a profile with a non-empty user name exists.
    ///
    /// An unreadable or corrupt file counts as not onboarded.
    pub fn is_onboarded(&self) -> bool {
        match self.load() {
            Ok(Some(profile)) => !profile.username.trim().is_empty(),
            Ok(None) => false,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "profile unreadable");
                false
            }
        }
    }

    /// Save the profile, replacing any previous one.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        debug!(path = %self.path.display(), username = %profile.username, "saving profile");
        atomic_write_json(&self.path, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_profile() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));

        assert!(store.load().unwrap().is_none());
        assert!(!store.is_onboarded());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("aero/profile.json"));

        let mut profile = Profile::new("ada").with_time_24(false);
        profile
            .nic_nicknames
            .insert("eth0".to_string(), "office".to_string());
        store.save(&profile).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, profile);
        assert!(store.is_onboarded());
    }

    #[test]
    fn test_blank_username_is_not_onboarded() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        store.save(&Profile::new("  ")).unwrap();
        assert!(!store.is_onboarded());
    }

    #[test]
    fn test_corrupt_file_is_not_onboarded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = ProfileStore::new(path);
        assert!(store.load().is_err());
        assert!(!store.is_onboarded());
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(
            &path,
            r#"{"username":"ada","created_at":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let profile = ProfileStore::new(path).load().unwrap().unwrap();
        assert!(profile.time_24);
        assert!(profile.nic_nicknames.is_empty());
    }

    #[test]
    fn test_nic_label() {
        let mut profile = Profile::new("ada");
        profile
            .nic_nicknames
            .insert("wlan0".to_string(), "home wifi".to_string());
        assert_eq!(profile.nic_label("wlan0"), "home wifi");
        assert_eq!(profile.nic_label("eth0"), "eth0");
    }
}
