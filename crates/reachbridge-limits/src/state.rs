//! Persisted counter state.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::LimitError;
use crate::limiter::ActionCategory;

/// One calendar day's counters plus the running monthly InMail count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitState {
    /// The day these daily counters belong to.
    pub date: NaiveDate,
    pub connections: u32,
    pub inmails: u32,
    pub messages: u32,
    pub scrapes: u32,
    /// (year, month) the monthly counter belongs to.
    pub month: (i32, u32),
    pub monthly_inmails: u32,
}

impl LimitState {
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            date: today,
            connections: 0,
            inmails: 0,
            messages: 0,
            scrapes: 0,
            month: (today.year(), today.month()),
            monthly_inmails: 0,
        }
    }

    /// The state as it stands on `today`, with rollovers applied. Daily
    /// counters zero when the stored date is stale; the monthly counter
    /// zeroes independently, on the first access in a new month.
    pub fn effective(&self, today: NaiveDate) -> Self {
        let mut state = self.clone();
        if state.date != today {
            state.date = today;
            state.connections = 0;
            state.inmails = 0;
            state.messages = 0;
            state.scrapes = 0;
        }
        if state.month != (today.year(), today.month()) {
            state.month = (today.year(), today.month());
            state.monthly_inmails = 0;
        }
        state
    }

    pub fn count(&self, category: ActionCategory) -> u32 {
        match category {
            ActionCategory::Connections => self.connections,
            ActionCategory::Inmails => self.inmails,
            ActionCategory::Messages => self.messages,
            ActionCategory::Scrapes => self.scrapes,
        }
    }

    pub fn increment(&mut self, category: ActionCategory) {
        match category {
            ActionCategory::Connections => self.connections += 1,
            ActionCategory::Inmails => {
                self.inmails += 1;
                self.monthly_inmails += 1;
            }
            ActionCategory::Messages => self.messages += 1,
            ActionCategory::Scrapes => self.scrapes += 1,
        }
    }
}

/// Persistence seam for [`LimitState`].
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> Result<Option<LimitState>, LimitError>;
    async fn save(&self, state: &LimitState) -> Result<(), LimitError>;
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStateStore {
    state: tokio::sync::RwLock<Option<LimitState>>,
    saves: std::sync::atomic::AtomicU32,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `save` has been called. Lets channel tests assert
    /// that accounting happens exactly once per confirmed success.
    pub fn save_count(&self) -> u32 {
        self.saves.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<Option<LimitState>, LimitError> {
        Ok(self.state.read().await.clone())
    }

    async fn save(&self, state: &LimitState) -> Result<(), LimitError> {
        *self.state.write().await = Some(state.clone());
        self.saves.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

/// File-backed store: a single JSON document, replaced atomically
/// (write to a temp file, then rename) so a crash mid-write cannot lose
/// the previous day's counts.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<Option<LimitState>, LimitError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let state: LimitState = serde_json::from_str(&content)?;
                Ok(Some(state))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, state: &LimitState) -> Result<(), LimitError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!("Persisted rate-limit state to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_rollover_resets_daily_only() {
        let mut state = LimitState::fresh(date(2026, 3, 10));
        state.connections = 7;
        state.inmails = 2;
        state.monthly_inmails = 12;

        let rolled = state.effective(date(2026, 3, 11));
        assert_eq!(rolled.connections, 0);
        assert_eq!(rolled.inmails, 0);
        // Same month: monthly counter survives the day boundary.
        assert_eq!(rolled.monthly_inmails, 12);
    }

    #[test]
    fn test_month_rollover_resets_monthly_independently() {
        let mut state = LimitState::fresh(date(2026, 3, 31));
        state.monthly_inmails = 40;
        state.inmails = 3;

        let rolled = state.effective(date(2026, 4, 1));
        assert_eq!(rolled.monthly_inmails, 0);
        assert_eq!(rolled.inmails, 0);
        assert_eq!(rolled.month, (2026, 4));
    }

    #[test]
    fn test_same_day_is_identity() {
        let mut state = LimitState::fresh(date(2026, 3, 10));
        state.messages = 4;
        assert_eq!(state.effective(date(2026, 3, 10)), state);
    }

    #[test]
    fn test_inmail_increment_touches_both_counters() {
        let mut state = LimitState::fresh(date(2026, 3, 10));
        state.increment(ActionCategory::Inmails);
        assert_eq!(state.inmails, 1);
        assert_eq!(state.monthly_inmails, 1);
        state.increment(ActionCategory::Connections);
        assert_eq!(state.connections, 1);
        assert_eq!(state.monthly_inmails, 1);
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(dir.path().join("limits.json"));

        assert!(store.load().await.unwrap().is_none());

        let mut state = LimitState::fresh(date(2026, 3, 10));
        state.scrapes = 9;
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(dir.path().join("nested/deep/limits.json"));
        store
            .save(&LimitState::fresh(date(2026, 1, 1)))
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_some());
    }
}
