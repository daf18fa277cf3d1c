//! Subcommand implementations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use tracing::{info, warn};

use reachbridge_agent::{AgentSettings, ChannelClient, ExtensionAgent};
use reachbridge_channel::{ChannelTiming, CommandChannel, RelayConfig, RelayServer};
use reachbridge_config::{Config, ConfigLoader};
use reachbridge_limits::{FileStateStore, LimitCaps, RateLimiter};
use reachbridge_protocols::{
    Action, ActionArgs, ConnectionDegree, FailureCode, Outcome, OutcomeData, SearchFilters,
};

use crate::cli::SendAction;
use crate::ledger::ProfileLedger;

/// Run the command channel server. Blocks until shutdown.
pub(crate) async fn run_serve(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let caps = LimitCaps {
        connections: config.limits.connections_per_day,
        inmails: config.limits.inmails_per_day,
        messages: config.limits.messages_per_day,
        scrapes: config.limits.scrapes_per_day,
        monthly_inmails: config.limits.inmails_per_month,
    };
    let state_path = ConfigLoader::expand_path(&config.limits.state_path);
    let store = Arc::new(FileStateStore::new(state_path));
    let limiter = Arc::new(
        RateLimiter::load(caps, store)
            .await
            .context("loading rate-limit state")?,
    );

    let timing = ChannelTiming {
        standard_timeout: Duration::from_millis(config.channel.standard_timeout_ms),
        search_timeout: Duration::from_millis(config.channel.search_timeout_ms),
        agent_fresh: Duration::from_millis(config.channel.agent_fresh_ms),
    };
    let channel = Arc::new(CommandChannel::new(limiter, timing));

    let relay = RelayConfig::new(
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port),
    );
    let server = RelayServer::new(relay, channel);
    server
        .run()
        .await
        .map_err(|e| anyhow!("relay server: {}", e))
}

/// Run the browser-side agent loop. Never returns.
pub(crate) async fn run_agent(config: Config) -> anyhow::Result<()> {
    let settings = AgentSettings::from_config(&config);
    let mut agent = ExtensionAgent::new(settings);
    agent.run().await;
    Ok(())
}

/// Submit one command, print its outcome as JSON on stdout, and hand back
/// the process exit code. Diagnostics go to stderr only.
pub(crate) async fn run_send(config: Config, action: SendAction) -> anyhow::Result<i32> {
    let client = channel_client(&config);
    let (action, args) = build_command(action)?;

    let outcome = match client.status().await {
        Ok(status) if !status.agent_connected => Outcome::fail(
            FailureCode::ExtensionNotConnected,
            "browser agent is not polling the channel; start `reachbridge agent`",
        ),
        Ok(_) => {
            info!(action = %action, "submitting");
            client
                .submit(action, args)
                .await
                .context("submitting command")?
        }
        Err(e) => return Err(anyhow!("channel server unreachable: {}", e)),
    };

    if let Some(OutcomeData::Search(data)) = &outcome.data {
        merge_into_ledger(&config, &data.profiles);
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(if outcome.success { 0 } else { 1 })
}

/// Print connectivity and remaining quota as JSON on stdout.
pub(crate) async fn run_status(config: Config) -> anyhow::Result<()> {
    let client = channel_client(&config);
    let status = client
        .status()
        .await
        .map_err(|e| anyhow!("channel server unreachable: {}", e))?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn channel_client(config: &Config) -> ChannelClient {
    ChannelClient::new(&format!(
        "http://{}:{}",
        config.server.host, config.server.port
    ))
}

fn merge_into_ledger(config: &Config, profiles: &[reachbridge_protocols::DiscoveredProfile]) {
    if profiles.is_empty() {
        return;
    }
    let path = ConfigLoader::expand_path(&config.limits.ledger_path);
    match ProfileLedger::load(&path) {
        Ok(mut ledger) => {
            let added = ledger.merge(profiles);
            match ledger.save() {
                Ok(()) => info!(added, total = ledger.len(), "ledger updated"),
                Err(e) => warn!("could not save ledger: {}", e),
            }
        }
        Err(e) => warn!("could not open ledger: {}", e),
    }
}

/// Map a CLI subcommand to a wire command.
fn build_command(action: SendAction) -> anyhow::Result<(Action, ActionArgs)> {
    Ok(match action {
        SendAction::Search {
            keywords,
            title,
            location,
            degree,
            pages,
            limit,
        } => {
            let degree = degree.as_deref().map(parse_degree).transpose()?;
            let filters = SearchFilters {
                keywords,
                title,
                location,
                degree,
            };
            if filters.is_empty() {
                return Err(anyhow!("search needs at least one filter"));
            }
            let args = ActionArgs {
                filters,
                max_pages: Some(pages.max(1)),
                target_count: limit,
                ..Default::default()
            };
            (Action::Search, args)
        }
        SendAction::Scan { profile_url } => {
            (Action::DeepScan, ActionArgs::for_profile(profile_url))
        }
        SendAction::Connect { profile_url, note } => {
            let args = ActionArgs {
                note,
                ..ActionArgs::for_profile(profile_url)
            };
            (Action::SendConnection, args)
        }
        SendAction::Inmail {
            profile_url,
            subject,
            message,
        } => {
            let args = ActionArgs {
                subject,
                message: Some(message),
                ..ActionArgs::for_profile(profile_url)
            };
            (Action::SendInmail, args)
        }
        SendAction::Message {
            profile_url,
            message,
        } => {
            let args = ActionArgs {
                message: Some(message),
                ..ActionArgs::for_profile(profile_url)
            };
            (Action::SendMessage, args)
        }
        SendAction::Check { profile_url } => {
            (Action::CheckStatus, ActionArgs::for_profile(profile_url))
        }
        SendAction::Ping => (Action::Ping, ActionArgs::default()),
    })
}

fn parse_degree(s: &str) -> anyhow::Result<ConnectionDegree> {
    match s.to_ascii_lowercase().as_str() {
        "first" | "1" | "1st" => Ok(ConnectionDegree::First),
        "second" | "2" | "2nd" => Ok(ConnectionDegree::Second),
        "third" | "3" | "3rd" => Ok(ConnectionDegree::Third),
        other => Err(anyhow!(
            "unknown degree '{}', expected first/second/third",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_degree_variants() {
        assert_eq!(parse_degree("first").unwrap(), ConnectionDegree::First);
        assert_eq!(parse_degree("2nd").unwrap(), ConnectionDegree::Second);
        assert_eq!(parse_degree("3").unwrap(), ConnectionDegree::Third);
        assert!(parse_degree("fourth").is_err());
    }

    #[test]
    fn test_search_requires_a_filter() {
        let result = build_command(SendAction::Search {
            keywords: None,
            title: None,
            location: None,
            degree: None,
            pages: 1,
            limit: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_connect_command_shape() {
        let (action, args) = build_command(SendAction::Connect {
            profile_url: "https://www.linkedin.com/in/a".to_string(),
            note: Some("hello".to_string()),
        })
        .unwrap();
        assert_eq!(action, Action::SendConnection);
        assert_eq!(args.profile_url.as_deref(), Some("https://www.linkedin.com/in/a"));
        assert_eq!(args.note.as_deref(), Some("hello"));
    }
}
