//! Flat-file persistence for per-user profiles.
//!
//! One pretty-printed JSON file per user id under a configured directory.
//! First use writes the default profile so the user always has a file to
//! inspect or hand-edit between sessions.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tassist_models::UserProfile;
use tracing::info;

pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{user_id}.json"))
    }

    /// Load the user's profile, creating and persisting a default one on
    /// first use.
    pub fn load_or_create(&self, user_id: &str) -> Result<UserProfile, anyhow::Error> {
        let path = self.path_for(user_id);
        if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read profile: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse profile: {}", path.display()))
        } else {
            let profile = UserProfile::new(user_id);
            self.save(&profile)?;
            info!(user_id, "Created new user profile");
            Ok(profile)
        }
    }

    pub fn save(&self, profile: &UserProfile) -> Result<(), anyhow::Error> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create profile dir: {}", self.dir.display()))?;
        let path = self.path_for(&profile.user_id);
        let json = serde_json::to_string_pretty(profile)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write profile: {}", path.display()))
    }

    /// Append a session summary to the user's profile and persist it.
    pub fn record_session(&self, user_id: &str, summary: &str) -> Result<(), anyhow::Error> {
        let mut profile = self.load_or_create(user_id)?;
        profile.record_session(summary);
        self.save(&profile)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_use_writes_default_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        let profile = store.load_or_create("trader1").unwrap();
        assert_eq!(profile.user_id, "trader1");
        assert_eq!(profile.risk_tolerance, "medium");
        assert!(dir.path().join("trader1.json").exists());
    }

    #[test]
    fn profile_roundtrips_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        let mut profile = store.load_or_create("trader2").unwrap();
        profile.recurring_patterns.push("fomo".to_string());
        profile.record_session("Reviewed overnight gaps");
        store.save(&profile).unwrap();

        let reloaded = store.load_or_create("trader2").unwrap();
        assert_eq!(reloaded, profile);
    }

    #[test]
    fn record_session_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        store.record_session("trader3", "first session").unwrap();
        store.record_session("trader3", "second session").unwrap();

        let profile = store.load_or_create("trader3").unwrap();
        assert_eq!(profile.sessions.len(), 2);
        assert_eq!(profile.sessions[1].summary, "second session");
    }

    #[test]
    fn corrupt_profile_is_an_error_not_a_reset() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        std::fs::write(dir.path().join("trader4.json"), "{broken").unwrap();

        let err = store.load_or_create("trader4").unwrap_err();
        assert!(err.to_string().contains("failed to parse profile"));
    }
}
