//! Action identifiers and the per-action argument bag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::ConnectionDegree;

/// The closed set of automation actions the relay understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Scrape one or more pages of people-search results.
    Search,
    /// Extract an extended profile record from the current profile page.
    DeepScan,
    /// Send a connection request, optionally with a note.
    SendConnection,
    /// Send a premium InMail (subject + body).
    SendInmail,
    /// Inspect a profile page for connection state.
    CheckStatus,
    /// Send a message to an accepted connection.
    SendMessage,
    /// Cheap liveness probe: session authenticated? challenge overlay up?
    Ping,
}

impl Action {
    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Search => "search",
            Action::DeepScan => "deepScan",
            Action::SendConnection => "sendConnection",
            Action::SendInmail => "sendInmail",
            Action::CheckStatus => "checkStatus",
            Action::SendMessage => "sendMessage",
            Action::Ping => "ping",
        }
    }

    /// Multi-page actions need a materially longer resolution window than
    /// single-click actions.
    pub fn is_long_running(&self) -> bool {
        matches!(self, Action::Search)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured filters for a people search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<ConnectionDegree>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_none()
            && self.title.is_none()
            && self.location.is_none()
            && self.degree.is_none()
    }
}

/// Action-specific parameters. One bag for all actions; handlers read the
/// fields they need and ignore the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionArgs {
    /// Target profile URL for profile-scoped actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,

    /// Free-text note for a connection request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// InMail subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Message or InMail body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Search filters (search only).
    #[serde(default, skip_serializing_if = "SearchFilters::is_empty")]
    pub filters: SearchFilters,

    /// Upper bound on search result pages to visit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,

    /// Stop a search early once this many profiles are accumulated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,

    /// Set by the agent once it has navigated the tab itself. The executor
    /// must not navigate again; doing so would tear down the injected
    /// helper script mid-action.
    #[serde(default)]
    pub skip_navigation: bool,
}

impl ActionArgs {
    pub fn for_profile(url: impl Into<String>) -> Self {
        Self {
            profile_url: Some(url.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(
            serde_json::to_string(&Action::SendConnection).unwrap(),
            "\"sendConnection\""
        );
        assert_eq!(
            serde_json::to_string(&Action::DeepScan).unwrap(),
            "\"deepScan\""
        );
        let parsed: Action = serde_json::from_str("\"checkStatus\"").unwrap();
        assert_eq!(parsed, Action::CheckStatus);
    }

    #[test]
    fn test_display_matches_serde() {
        for action in [
            Action::Search,
            Action::DeepScan,
            Action::SendConnection,
            Action::SendInmail,
            Action::CheckStatus,
            Action::SendMessage,
            Action::Ping,
        ] {
            let wire = serde_json::to_string(&action).unwrap();
            assert_eq!(wire, format!("\"{}\"", action));
        }
    }

    #[test]
    fn test_long_running() {
        assert!(Action::Search.is_long_running());
        assert!(!Action::SendConnection.is_long_running());
        assert!(!Action::Ping.is_long_running());
    }

    #[test]
    fn test_args_default_skips_empty_fields() {
        let args = ActionArgs::for_profile("https://example.com/in/someone");
        let json = serde_json::to_value(&args).unwrap();
        assert!(json.get("note").is_none());
        assert!(json.get("filters").is_none());
        assert_eq!(json["skip_navigation"], false);
    }
}
