//! The rate limiter proper.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use reachbridge_protocols::Action;

use crate::error::LimitError;
use crate::state::{LimitState, StateStore};

/// Metered action categories. Actions with no category are unmetered and
/// always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionCategory {
    Connections,
    Inmails,
    Messages,
    Scrapes,
}

impl ActionCategory {
    /// Category an action counts against. `checkStatus` and `ping` are
    /// read-only probes and are unmetered.
    pub fn of(action: Action) -> Option<Self> {
        match action {
            Action::SendConnection => Some(ActionCategory::Connections),
            Action::SendInmail => Some(ActionCategory::Inmails),
            Action::SendMessage => Some(ActionCategory::Messages),
            Action::Search | Action::DeepScan => Some(ActionCategory::Scrapes),
            Action::CheckStatus | Action::Ping => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Connections => "connections",
            ActionCategory::Inmails => "inmails",
            ActionCategory::Messages => "messages",
            ActionCategory::Scrapes => "scrapes",
        }
    }
}

/// Configured caps. `monthly_inmails` is the one monthly quota the platform
/// equivalent imposes on premium messaging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LimitCaps {
    pub connections: u32,
    pub inmails: u32,
    pub messages: u32,
    pub scrapes: u32,
    pub monthly_inmails: u32,
}

impl LimitCaps {
    pub fn daily(&self, category: ActionCategory) -> u32 {
        match category {
            ActionCategory::Connections => self.connections,
            ActionCategory::Inmails => self.inmails,
            ActionCategory::Messages => self.messages,
            ActionCategory::Scrapes => self.scrapes,
        }
    }
}

/// Verdict of a quota probe.
#[derive(Debug, Clone)]
pub struct Allowance {
    pub ok: bool,
    pub reason: Option<String>,
}

impl Allowance {
    fn granted() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    fn denied(reason: String) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
        }
    }
}

/// Point-in-time counter view for the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitSnapshot {
    pub date: NaiveDate,
    pub connections: (u32, u32),
    pub inmails: (u32, u32),
    pub messages: (u32, u32),
    pub scrapes: (u32, u32),
    pub monthly_inmails: (u32, u32),
}

/// Tracks per-category counters against configured caps.
///
/// `allowed` and `remaining` are pure reads: rollover is applied to the view,
/// never written back, so callers can probe without side effects. Only
/// `record` mutates, and it persists synchronously before returning.
pub struct RateLimiter {
    caps: LimitCaps,
    state: Mutex<LimitState>,
    store: Arc<dyn StateStore>,
}

impl RateLimiter {
    /// Load persisted state (or start fresh) and build the limiter.
    pub async fn load(caps: LimitCaps, store: Arc<dyn StateStore>) -> Result<Self, LimitError> {
        let today = Utc::now().date_naive();
        let state = store
            .load()
            .await?
            .map(|s| s.effective(today))
            .unwrap_or_else(|| LimitState::fresh(today));
        Ok(Self {
            caps,
            state: Mutex::new(state),
            store,
        })
    }

    /// Would an action of this type be within quota right now?
    pub fn allowed(&self, action: Action) -> Allowance {
        let Some(category) = ActionCategory::of(action) else {
            return Allowance::granted();
        };
        let today = Utc::now().date_naive();
        let view = self.state.lock().effective(today);

        let cap = self.caps.daily(category);
        if view.count(category) >= cap {
            return Allowance::denied(format!(
                "daily {} cap reached ({}/{})",
                category.as_str(),
                view.count(category),
                cap
            ));
        }
        if category == ActionCategory::Inmails && view.monthly_inmails >= self.caps.monthly_inmails
        {
            return Allowance::denied(format!(
                "monthly inmail cap reached ({}/{})",
                view.monthly_inmails, self.caps.monthly_inmails
            ));
        }
        Allowance::granted()
    }

    /// Remaining quota for the day; `None` for unmetered actions.
    pub fn remaining(&self, action: Action) -> Option<u32> {
        let category = ActionCategory::of(action)?;
        let today = Utc::now().date_naive();
        let view = self.state.lock().effective(today);
        Some(self.caps.daily(category).saturating_sub(view.count(category)))
    }

    /// Count one confirmed action and persist immediately. No-op for
    /// unmetered actions so the channel can call this uniformly on success.
    pub async fn record(&self, action: Action) -> Result<(), LimitError> {
        let Some(category) = ActionCategory::of(action) else {
            return Ok(());
        };
        let today = Utc::now().date_naive();
        let snapshot = {
            let mut state = self.state.lock();
            *state = state.effective(today);
            state.increment(category);
            state.clone()
        };
        self.store.save(&snapshot).await?;
        debug!(
            category = category.as_str(),
            used = snapshot.count(category),
            "recorded action"
        );
        Ok(())
    }

    /// Current counters with their caps, for the status surface.
    pub fn snapshot(&self) -> LimitSnapshot {
        let today = Utc::now().date_naive();
        let view = self.state.lock().effective(today);
        LimitSnapshot {
            date: view.date,
            connections: (view.connections, self.caps.connections),
            inmails: (view.inmails, self.caps.inmails),
            messages: (view.messages, self.caps.messages),
            scrapes: (view.scrapes, self.caps.scrapes),
            monthly_inmails: (view.monthly_inmails, self.caps.monthly_inmails),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStateStore;
    use chrono::Duration;

    fn caps() -> LimitCaps {
        LimitCaps {
            connections: 2,
            inmails: 2,
            messages: 3,
            scrapes: 5,
            monthly_inmails: 3,
        }
    }

    async fn limiter_with(store: Arc<MemoryStateStore>) -> RateLimiter {
        RateLimiter::load(caps(), store).await.unwrap()
    }

    #[tokio::test]
    async fn test_cap_plus_one_rejected() {
        let limiter = limiter_with(Arc::new(MemoryStateStore::new())).await;

        for _ in 0..2 {
            assert!(limiter.allowed(Action::SendConnection).ok);
            limiter.record(Action::SendConnection).await.unwrap();
        }
        let verdict = limiter.allowed(Action::SendConnection);
        assert!(!verdict.ok);
        assert!(verdict.reason.unwrap().contains("connections"));
    }

    #[tokio::test]
    async fn test_allowed_is_a_pure_read() {
        let limiter = limiter_with(Arc::new(MemoryStateStore::new())).await;
        for _ in 0..10 {
            assert!(limiter.allowed(Action::SendConnection).ok);
        }
        assert_eq!(limiter.remaining(Action::SendConnection), Some(2));
    }

    #[tokio::test]
    async fn test_unmetered_actions_always_allowed() {
        let limiter = limiter_with(Arc::new(MemoryStateStore::new())).await;
        for _ in 0..100 {
            assert!(limiter.allowed(Action::Ping).ok);
            limiter.record(Action::Ping).await.unwrap();
        }
        assert_eq!(limiter.remaining(Action::Ping), None);
        assert!(limiter.allowed(Action::CheckStatus).ok);
    }

    #[tokio::test]
    async fn test_daily_rollover_restores_quota() {
        let store = Arc::new(MemoryStateStore::new());
        // Seed exhausted counters dated yesterday.
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let mut stale = LimitState::fresh(yesterday);
        stale.connections = 99;
        store.save(&stale).await.unwrap();

        let limiter = limiter_with(store).await;
        assert!(limiter.allowed(Action::SendConnection).ok);
        assert_eq!(limiter.remaining(Action::SendConnection), Some(2));
    }

    #[tokio::test]
    async fn test_monthly_cap_independent_of_daily() {
        let store = Arc::new(MemoryStateStore::new());
        // Monthly counter near its cap, daily counters stale (yesterday).
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let mut stale = LimitState::fresh(yesterday);
        stale.inmails = 2;
        stale.monthly_inmails = 3;
        // Keep month current so the monthly count carries over.
        let today = Utc::now().date_naive();
        stale.month = (
            chrono::Datelike::year(&today),
            chrono::Datelike::month(&today),
        );
        store.save(&stale).await.unwrap();

        let limiter = limiter_with(store).await;
        // Daily quota rolled over but the monthly cap still blocks.
        let verdict = limiter.allowed(Action::SendInmail);
        assert!(!verdict.ok);
        assert!(verdict.reason.unwrap().contains("monthly"));
    }

    #[tokio::test]
    async fn test_record_persists_every_time() {
        let store = Arc::new(MemoryStateStore::new());
        let limiter = limiter_with(store.clone()).await;

        limiter.record(Action::Search).await.unwrap();
        limiter.record(Action::Search).await.unwrap();
        assert_eq!(store.save_count(), 2);

        let persisted = store.load().await.unwrap().unwrap();
        assert_eq!(persisted.scrapes, 2);
    }

    #[tokio::test]
    async fn test_snapshot_reports_used_and_caps() {
        let limiter = limiter_with(Arc::new(MemoryStateStore::new())).await;
        limiter.record(Action::SendMessage).await.unwrap();
        let snap = limiter.snapshot();
        assert_eq!(snap.messages, (1, 3));
        assert_eq!(snap.connections, (0, 2));
    }
}
