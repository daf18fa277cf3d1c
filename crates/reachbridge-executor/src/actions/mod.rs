//! One handler per action.
//!
//! Handlers classify what they see on the page as specifically as they can:
//! "already connected", "request pending" and "no connect control" are three
//! different answers and callers branch on each.

pub(crate) mod connect;
pub(crate) mod inmail;
pub(crate) mod message;
pub(crate) mod ping;
pub(crate) mod scan;
pub(crate) mod status;

/// Platform hard limit on connection-note length.
pub(crate) const NOTE_LIMIT: usize = 300;

/// Truncate to `limit` characters, ending in a "..." marker so the recipient
/// can tell the text was cut.
pub(crate) fn truncate_with_marker(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
pub(crate) mod fixture;
