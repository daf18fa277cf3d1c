//! The poll loop and its connectivity state machine.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use reachbridge_config::Config;
use reachbridge_executor::{Executor, Pacing};
use reachbridge_protocols::Command;

use crate::client::ChannelClient;
use crate::execute::{execute_command, ExecSettings};

/// Agent connectivity, as the agent itself sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    /// Polling has been failing; the channel will mark us stale.
    Disconnected,
    /// Polling normally, nothing claimed.
    Connected,
    /// A claimed command is executing.
    Busy,
}

/// Everything the agent needs, flattened out of the config file.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub server_url: String,
    pub cdp_endpoint: String,
    pub platform_domain: String,
    pub poll_interval: Duration,
    pub failure_threshold: u32,
    pub tab_ready_timeout: Duration,
    pub inject_retries: u32,
    pub pacing: Pacing,
}

impl AgentSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            server_url: format!("http://{}:{}", config.server.host, config.server.port),
            cdp_endpoint: config.browser.cdp_endpoint.clone(),
            platform_domain: config.browser.platform_domain.clone(),
            poll_interval: Duration::from_millis(config.channel.poll_interval_ms),
            failure_threshold: config.channel.poll_failure_threshold.max(1),
            tab_ready_timeout: Duration::from_millis(config.browser.tab_ready_timeout_ms),
            inject_retries: config.browser.inject_retries,
            pacing: Pacing {
                char_delay_ms: (
                    config.pacing.char_delay_min_ms,
                    config.pacing.char_delay_max_ms,
                ),
                action_delay_ms: (
                    config.pacing.action_delay_min_ms,
                    config.pacing.action_delay_max_ms,
                ),
                wait_timeout: Duration::from_millis(config.pacing.wait_timeout_ms),
            },
        }
    }
}

/// The browser-side agent: claims commands, executes, posts results.
pub struct ExtensionAgent {
    client: ChannelClient,
    settings: AgentSettings,
    executor: Executor,
    state: ConnState,
    consecutive_failures: u32,
}

impl ExtensionAgent {
    pub fn new(settings: AgentSettings) -> Self {
        Self {
            client: ChannelClient::new(&settings.server_url),
            executor: Executor::new(settings.pacing.clone()),
            settings,
            state: ConnState::Disconnected,
            consecutive_failures: 0,
        }
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    /// Poll forever on a fixed interval. One command at a time, exactly one
    /// posted outcome per claimed command.
    pub async fn run(&mut self) {
        info!(
            server = %self.settings.server_url,
            domain = %self.settings.platform_domain,
            "agent polling"
        );

        loop {
            match self.client.poll().await {
                Ok(Some(command)) => {
                    self.mark_poll_ok();
                    self.handle(command).await;
                }
                Ok(None) => {
                    self.mark_poll_ok();
                }
                Err(e) => {
                    self.consecutive_failures += 1;
                    if self.consecutive_failures >= self.settings.failure_threshold {
                        if self.state != ConnState::Disconnected {
                            warn!(
                                failures = self.consecutive_failures,
                                "channel unreachable, marking disconnected: {}", e
                            );
                        }
                        self.state = ConnState::Disconnected;
                    } else {
                        debug!("poll failed: {}", e);
                    }
                }
            }

            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    fn mark_poll_ok(&mut self) {
        if self.state == ConnState::Disconnected {
            info!("channel reachable again");
        }
        self.consecutive_failures = 0;
        self.state = ConnState::Connected;
    }

    async fn handle(&mut self, command: Command) {
        info!(id = %command.id, action = %command.action, "claimed command");
        self.state = ConnState::Busy;

        let exec = ExecSettings {
            cdp_endpoint: self.settings.cdp_endpoint.clone(),
            platform_domain: self.settings.platform_domain.clone(),
            ready_timeout: self.settings.tab_ready_timeout,
            inject_retries: self.settings.inject_retries,
        };
        let outcome = execute_command(&exec, &self.executor, &command).await;

        debug!(id = %command.id, success = outcome.success, "posting result");
        if let Err(e) = self.client.post_result(command.id, outcome).await {
            // The channel resolves the caller by timeout in this case; the
            // command must not be retried here, that would double-execute.
            error!(id = %command.id, "failed to post result: {}", e);
        }

        self.state = ConnState::Connected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_config() {
        let config = Config::default();
        let settings = AgentSettings::from_config(&config);
        assert_eq!(settings.server_url, "http://127.0.0.1:3000");
        assert_eq!(settings.platform_domain, "linkedin.com");
        assert_eq!(settings.poll_interval, Duration::from_millis(2_000));
        assert_eq!(settings.pacing.char_delay_ms, (40, 140));
    }

    #[test]
    fn test_failure_threshold_never_zero() {
        let mut config = Config::default();
        config.channel.poll_failure_threshold = 0;
        let settings = AgentSettings::from_config(&config);
        assert_eq!(settings.failure_threshold, 1);
    }

    #[test]
    fn test_agent_starts_disconnected() {
        let settings = AgentSettings::from_config(&Config::default());
        let agent = ExtensionAgent::new(settings);
        assert_eq!(agent.state(), ConnState::Disconnected);
    }
}
