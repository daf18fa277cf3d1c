//! Structured results and the closed failure taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::{ConnectionStatus, DiscoveredProfile, ProfileDetails};

/// Closed set of failure codes surfaced to callers.
///
/// The DOM executor classifies page-level conditions as specifically as it
/// can; the agent adds transport-level codes (tab missing, script dead); the
/// channel adds only `RateLimited`, `Timeout` and `ChannelBusy`, all
/// determined from channel state alone. Free text belongs in
/// [`Outcome::detail`], never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    /// Local quota exceeded for this action type.
    RateLimited,
    /// No result arrived within the allotted window. Outcome unknown.
    Timeout,
    /// The platform presented a human-verification challenge.
    Captcha,
    /// Platform-side weekly invite cap reached.
    WeeklyLimit,
    /// Target is already a connection.
    AlreadyConnected,
    /// A connection request is already outstanding.
    Pending,
    /// No connect control anywhere on the page.
    NoConnectButton,
    /// Premium messaging entry point absent (account-tier limitation).
    NoInmailButton,
    /// Messaging control absent; target is not an accepted connection.
    NoMessageButton,
    /// Some other expected UI element never appeared.
    ControlNotFound,
    /// The browser agent is not polling the channel.
    ExtensionNotConnected,
    /// Helper script could not be injected or went unresponsive.
    ContentScriptNotReady,
    /// No tab on the platform domain exists; the agent never opens one.
    NoTabOpen,
    /// Session is unauthenticated.
    NotLoggedIn,
    /// The agent's own navigation failed.
    NavigationFailed,
    /// A command was already in flight; submissions are not queued.
    ChannelBusy,
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Matches the serde wire form.
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(s.trim_matches('"'))
    }
}

/// Why a multi-page search stopped before its page budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// The next-page control was absent or disabled.
    NoMorePages,
    /// The requested profile count was reached.
    TargetReached,
    /// A challenge overlay appeared mid-search.
    Captcha,
    /// The helper script could not be re-injected after a page change.
    InjectionLost,
}

/// Accumulated search payload. Partial results are valid: a stop on page 3
/// of 10 still returns the pages already scraped, with `stopped` saying why.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchData {
    pub profiles: Vec<DiscoveredProfile>,
    pub pages_scraped: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped: Option<StopReason>,
}

/// Ping payload: session health as seen from the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PingData {
    pub authenticated: bool,
    pub captcha_blocked: bool,
}

/// Action-specific success payload, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OutcomeData {
    Search(SearchData),
    Profile(ProfileDetails),
    Status { status: ConnectionStatus },
    Ping(PingData),
    /// Echo of the text actually submitted (post-truncation).
    Message { sent: String },
}

/// The single, final result of a [`Command`](crate::Command).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureCode>,
    /// Human-readable elaboration; never load-bearing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OutcomeData>,
}

impl Outcome {
    pub fn ok(data: OutcomeData) -> Self {
        Self {
            success: true,
            error: None,
            detail: None,
            data: Some(data),
        }
    }

    pub fn ok_empty() -> Self {
        Self {
            success: true,
            error: None,
            detail: None,
            data: None,
        }
    }

    pub fn fail(code: FailureCode, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(code),
            detail: Some(detail.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_code_wire_form() {
        assert_eq!(
            serde_json::to_string(&FailureCode::AlreadyConnected).unwrap(),
            "\"ALREADY_CONNECTED\""
        );
        assert_eq!(FailureCode::NoConnectButton.to_string(), "NO_CONNECT_BUTTON");
        assert_eq!(
            FailureCode::ContentScriptNotReady.to_string(),
            "CONTENT_SCRIPT_NOT_READY"
        );
    }

    #[test]
    fn test_failure_outcome_shape() {
        let outcome = Outcome::fail(FailureCode::WeeklyLimit, "invite cap modal shown");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "WEEKLY_LIMIT");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_search_outcome_keeps_partial_results() {
        let outcome = Outcome::ok(OutcomeData::Search(SearchData {
            profiles: vec![],
            pages_scraped: 2,
            stopped: Some(StopReason::Captcha),
        }));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["kind"], "search");
        assert_eq!(json["data"]["stopped"], "captcha");
    }

    #[test]
    fn test_outcome_round_trip() {
        let outcome = Outcome::ok(OutcomeData::Message {
            sent: "hello".into(),
        });
        let back: Outcome = serde_json::from_str(&serde_json::to_string(&outcome).unwrap()).unwrap();
        assert!(back.success);
        match back.data {
            Some(OutcomeData::Message { sent }) => assert_eq!(sent, "hello"),
            other => panic!("unexpected payload: {:?}", other),
        }
    }
}
