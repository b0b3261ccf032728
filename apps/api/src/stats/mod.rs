//! Usage Counter — two integers persisted in a JSON file, with a PIN-gated
//! reset. Loaded once at startup, written back after every change. An
//! explicit store injected through `AppState`, not an ambient singleton.

pub mod handlers;

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The fixed reset code. A shared-secret convention for the reset button,
/// deliberately not an authentication system.
pub const RESET_CODE: &str = "1941";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub cvs_sent: u64,
    pub emails_sent: u64,
}

pub struct StatsStore {
    path: PathBuf,
    stats: Mutex<UsageStats>,
}

impl StatsStore {
    /// Loads the counters from `path`, starting from zero when the file is
    /// absent or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stats = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("stats file {} is corrupt, starting from zero: {e}", path.display());
                UsageStats::default()
            }),
            Err(_) => UsageStats::default(),
        };
        Self {
            path,
            stats: Mutex::new(stats),
        }
    }

    pub fn snapshot(&self) -> UsageStats {
        self.lock().clone()
    }

    /// Adds to both counters and persists the new state. The file is written
    /// before memory is updated, so a failed write leaves the counters (and
    /// what `snapshot` reports) untouched.
    pub fn increment(&self, emails_sent: u64, cvs_sent: u64) -> anyhow::Result<()> {
        let mut stats = self.lock();
        let updated = UsageStats {
            emails_sent: stats.emails_sent.saturating_add(emails_sent),
            cvs_sent: stats.cvs_sent.saturating_add(cvs_sent),
        };
        self.persist(&updated)?;
        *stats = updated;
        Ok(())
    }

    /// Zeroes both counters when `code` matches the fixed constant. A wrong
    /// code leaves the counters untouched and returns `Ok(false)`; a failed
    /// write leaves them untouched too.
    pub fn reset(&self, code: &str) -> anyhow::Result<bool> {
        if code != RESET_CODE {
            return Ok(false);
        }
        let mut stats = self.lock();
        let zeroed = UsageStats::default();
        self.persist(&zeroed)?;
        *stats = zeroed;
        Ok(true)
    }

    fn persist(&self, stats: &UsageStats) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write stats file {}", self.path.display()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, UsageStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> StatsStore {
        StatsStore::load(dir.path().join("stats.json"))
    }

    #[test]
    fn test_missing_file_starts_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.snapshot(), UsageStats::default());
    }

    #[test]
    fn test_increment_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let store = StatsStore::load(&path);
        store.increment(3, 3).unwrap();
        store.increment(2, 0).unwrap();

        let reloaded = StatsStore::load(&path);
        let stats = reloaded.snapshot();
        assert_eq!(stats.emails_sent, 5);
        assert_eq!(stats.cvs_sent, 3);
    }

    #[test]
    fn test_reset_with_correct_code_zeroes_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let store = StatsStore::load(&path);
        store.increment(7, 7).unwrap();
        assert!(store.reset(RESET_CODE).unwrap());
        assert_eq!(store.snapshot(), UsageStats::default());

        let reloaded = StatsStore::load(&path);
        assert_eq!(reloaded.snapshot(), UsageStats::default());
    }

    #[test]
    fn test_reset_with_wrong_code_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.increment(4, 2).unwrap();

        assert!(!store.reset("0000").unwrap());
        assert!(!store.reset("").unwrap());

        let stats = store.snapshot();
        assert_eq!(stats.emails_sent, 4);
        assert_eq!(stats.cvs_sent, 2);
    }

    #[test]
    fn test_corrupt_file_starts_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "not json at all").unwrap();

        let store = StatsStore::load(&path);
        assert_eq!(store.snapshot(), UsageStats::default());
    }

    #[test]
    fn test_failed_persist_leaves_counters_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so every write fails
        let store = StatsStore::load(dir.path().join("missing").join("stats.json"));

        assert!(store.increment(3, 3).is_err());
        assert_eq!(store.snapshot(), UsageStats::default());

        assert!(store.reset(RESET_CODE).is_err());
        assert_eq!(store.snapshot(), UsageStats::default());
    }

    #[test]
    fn test_counters_saturate_instead_of_overflowing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.increment(u64::MAX, 1).unwrap();
        store.increment(1, 1).unwrap();
        assert_eq!(store.snapshot().emails_sent, u64::MAX);
    }
}
