//! Caller-owned profile ledger.
//!
//! Search and scan output accumulates here across runs, merged by profile
//! URL so re-running a search updates records instead of duplicating them.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use reachbridge_protocols::DiscoveredProfile;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    profiles: Vec<DiscoveredProfile>,
}

/// A JSON file of discovered profiles keyed by URL.
pub(crate) struct ProfileLedger {
    path: PathBuf,
    profiles: Vec<DiscoveredProfile>,
}

impl ProfileLedger {
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let profiles = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let file: LedgerFile = serde_json::from_str(&content)
                    .with_context(|| format!("corrupt ledger at {:?}", path))?;
                file.profiles
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e).with_context(|| format!("reading ledger at {:?}", path)),
        };
        Ok(Self { path, profiles })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Merge by URL: existing records are updated in place, new ones
    /// appended. Nothing is ever dropped.
    pub fn merge(&mut self, incoming: &[DiscoveredProfile]) -> usize {
        let mut added = 0;
        for profile in incoming {
            match self.profiles.iter_mut().find(|p| p.url == profile.url) {
                Some(existing) => *existing = profile.clone(),
                None => {
                    self.profiles.push(profile.clone());
                    added += 1;
                }
            }
        }
        added
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = LedgerFile {
            profiles: self.profiles.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reachbridge_protocols::ConnectionDegree;

    fn profile(url: &str, name: &str) -> DiscoveredProfile {
        DiscoveredProfile {
            url: url.to_string(),
            name: name.to_string(),
            headline: None,
            location: None,
            degree: ConnectionDegree::Unknown,
        }
    }

    #[test]
    fn test_merge_appends_and_updates() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = ProfileLedger::load(dir.path().join("profiles.json")).unwrap();

        let added = ledger.merge(&[profile("https://x/in/a", "A"), profile("https://x/in/b", "B")]);
        assert_eq!(added, 2);

        // Same URL again: update, not duplicate.
        let added = ledger.merge(&[profile("https://x/in/a", "A. Renamed")]);
        assert_eq!(added, 0);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");

        let mut ledger = ProfileLedger::load(&path).unwrap();
        ledger.merge(&[profile("https://x/in/a", "A")]);
        ledger.save().unwrap();

        let reloaded = ProfileLedger::load(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ProfileLedger::load(dir.path().join("none.json")).unwrap();
        assert_eq!(ledger.len(), 0);
    }
}
