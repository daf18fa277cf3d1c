//! The page capability seam.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Page-level transport errors.
///
/// These are mechanism failures (the page became unreachable, a script
/// threw), never platform conditions. Platform conditions are classified by
/// the action handlers into `FailureCode`s.
#[derive(Debug, Error)]
pub enum PageError {
    /// The transport to the page failed.
    #[error("Page transport error: {0}")]
    Transport(String),

    /// In-page JavaScript threw.
    #[error("JavaScript error: {0}")]
    Javascript(String),

    /// A page-level operation timed out.
    #[error("Page timeout: {0}")]
    Timeout(String),
}

/// What the executor needs from a page.
///
/// The production implementation drives a real tab; tests script this trait
/// with fixture states. All selector arguments are raw CSS selectors; role
/// resolution happens above this seam.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Whether at least one element matches the selector.
    async fn exists(&self, selector: &str) -> Result<bool, PageError>;

    /// Click the first element matching the selector.
    async fn click(&self, selector: &str) -> Result<(), PageError>;

    /// Append one character to the element's value and fire an input event.
    async fn type_char(&self, selector: &str, ch: char) -> Result<(), PageError>;

    /// Visible text of the first matching element.
    async fn text(&self, selector: &str) -> Result<Option<String>, PageError>;

    /// Whether the first matching element is present and not disabled.
    async fn enabled(&self, selector: &str) -> Result<bool, PageError>;

    /// Evaluate a JavaScript expression, returning its JSON value.
    async fn eval_json(&self, expression: &str) -> Result<Value, PageError>;

    /// Navigate the tab and wait until the document is usable.
    async fn navigate(&self, url: &str) -> Result<(), PageError>;

    /// The tab's current URL.
    async fn current_url(&self) -> Result<String, PageError>;

    /// Sleep. Routed through the driver so tests can collapse pacing delays.
    async fn pause(&self, duration: Duration);
}
