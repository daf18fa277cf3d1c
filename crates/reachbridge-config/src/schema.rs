//! Configuration schema.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub browser: BrowserConfig,
    pub limits: LimitsConfig,
    pub pacing: PacingConfig,
    pub channel: ChannelTimingConfig,
}

/// Command channel HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Browser-side agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Chrome remote-debugging endpoint.
    pub cdp_endpoint: String,
    /// Domain the target tab must already be on. The agent never opens one.
    pub platform_domain: String,
    /// Bound on waiting for a loading tab before proceeding anyway.
    pub tab_ready_timeout_ms: u64,
    /// Helper-script injection attempts before giving up.
    pub inject_retries: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            cdp_endpoint: "http://localhost:9222".to_string(),
            platform_domain: "linkedin.com".to_string(),
            tab_ready_timeout_ms: 15_000,
            inject_retries: 3,
        }
    }
}

/// Daily/monthly caps per action category. A category with a cap of 0 is
/// effectively disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub connections_per_day: u32,
    pub inmails_per_day: u32,
    pub messages_per_day: u32,
    pub scrapes_per_day: u32,
    pub inmails_per_month: u32,
    /// Rate-limit state file. Tilde-expanded.
    pub state_path: String,
    /// Caller-owned profile ledger. Tilde-expanded.
    pub ledger_path: String,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            connections_per_day: 20,
            inmails_per_day: 10,
            messages_per_day: 50,
            scrapes_per_day: 100,
            inmails_per_month: 50,
            state_path: "~/.reachbridge/limits.json".to_string(),
            ledger_path: "~/.reachbridge/profiles.json".to_string(),
        }
    }
}

/// Human-pacing delays. These exist to avoid bot-pattern detection, not for
/// correctness, and are deliberately tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub char_delay_min_ms: u64,
    pub char_delay_max_ms: u64,
    pub action_delay_min_ms: u64,
    pub action_delay_max_ms: u64,
    /// Bound for the observe-and-resolve element wait.
    pub wait_timeout_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            char_delay_min_ms: 40,
            char_delay_max_ms: 140,
            action_delay_min_ms: 400,
            action_delay_max_ms: 1_200,
            wait_timeout_ms: 8_000,
        }
    }
}

/// Channel-side timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelTimingConfig {
    /// Resolution window for single-click actions.
    pub standard_timeout_ms: u64,
    /// Resolution window for multi-page search actions.
    pub search_timeout_ms: u64,
    /// Agent poll interval.
    pub poll_interval_ms: u64,
    /// Consecutive poll failures before the agent reports disconnected.
    pub poll_failure_threshold: u32,
    /// A poll within this window marks the agent as connected in /api/status.
    pub agent_fresh_ms: u64,
}

impl Default for ChannelTimingConfig {
    fn default() -> Self {
        Self {
            standard_timeout_ms: 120_000,
            search_timeout_ms: 600_000,
            poll_interval_ms: 2_000,
            poll_failure_threshold: 5,
            agent_fresh_ms: 10_000,
        }
    }
}
