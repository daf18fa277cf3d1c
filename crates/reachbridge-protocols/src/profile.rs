//! Extracted profile records.

use serde::{Deserialize, Serialize};

/// Network distance between the session owner and a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionDegree {
    First,
    Second,
    Third,
    Unknown,
}

impl ConnectionDegree {
    /// Parse the degree badge text as rendered on result cards ("1st",
    /// "· 2nd", "3rd+", ...).
    pub fn from_badge(text: &str) -> Self {
        let t = text.trim();
        if t.contains("1st") {
            ConnectionDegree::First
        } else if t.contains("2nd") {
            ConnectionDegree::Second
        } else if t.contains("3rd") {
            ConnectionDegree::Third
        } else {
            ConnectionDegree::Unknown
        }
    }
}

impl Default for ConnectionDegree {
    fn default() -> Self {
        ConnectionDegree::Unknown
    }
}

/// Relationship state read off a profile page.
///
/// `Unknown` is explicit: absence of every recognizable control is never
/// inferred as any of the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionStatus {
    Accepted,
    Pending,
    NotConnected,
    Unknown,
}

/// A normalized record of an entity found by a search.
///
/// The URL is the natural key; callers dedupe and merge on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredProfile {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub degree: ConnectionDegree,
}

/// Extended record produced by a deep scan of a loaded profile page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub degree: Option<ConnectionDegree>,
    /// Up to a small bounded number of experience entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<String>,
    /// Up to a small bounded number of recent post snippets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent_posts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_from_badge() {
        assert_eq!(ConnectionDegree::from_badge(" · 1st"), ConnectionDegree::First);
        assert_eq!(ConnectionDegree::from_badge("2nd"), ConnectionDegree::Second);
        assert_eq!(ConnectionDegree::from_badge("3rd+"), ConnectionDegree::Third);
        assert_eq!(ConnectionDegree::from_badge("Follow"), ConnectionDegree::Unknown);
    }

    #[test]
    fn test_discovered_profile_minimal_json() {
        let p = DiscoveredProfile {
            url: "https://example.com/in/a".into(),
            name: "A".into(),
            headline: None,
            location: None,
            degree: ConnectionDegree::Unknown,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("headline").is_none());
        assert_eq!(json["degree"], "unknown");
    }
}
