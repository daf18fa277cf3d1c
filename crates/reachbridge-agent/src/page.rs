//! CDP-backed implementation of the executor's page seam.
//!
//! DOM primitives go through the injected helper bundle, so a dead bundle
//! surfaces as a JavaScript error here and the caller can re-inject.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use reachbridge_browser::{CdpError, PageSession};
use reachbridge_executor::{PageDriver, PageError};

/// Quote a Rust string as a JavaScript string literal.
fn js_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn map_err(e: CdpError) -> PageError {
    match e {
        CdpError::JavaScript(msg) => PageError::Javascript(msg),
        CdpError::Timeout(msg) => PageError::Timeout(msg),
        other => PageError::Transport(other.to_string()),
    }
}

/// A live tab as seen by the executor.
pub struct CdpPage {
    session: PageSession,
    ready_timeout: Duration,
}

impl CdpPage {
    pub fn new(session: PageSession, ready_timeout: Duration) -> Self {
        Self {
            session,
            ready_timeout,
        }
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }
}

#[async_trait]
impl PageDriver for CdpPage {
    async fn exists(&self, selector: &str) -> Result<bool, PageError> {
        let expr = format!("window.__reachbridge.exists({})", js_string(selector));
        let value = self.session.evaluate(&expr).await.map_err(map_err)?;
        Ok(value == Value::Bool(true))
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        let expr = format!("window.__reachbridge.click({})", js_string(selector));
        let value = self.session.evaluate(&expr).await.map_err(map_err)?;
        if value == Value::Bool(true) {
            Ok(())
        } else {
            Err(PageError::Javascript(format!(
                "click target vanished: {}",
                selector
            )))
        }
    }

    async fn type_char(&self, selector: &str, ch: char) -> Result<(), PageError> {
        let expr = format!(
            "window.__reachbridge.typeChar({}, {})",
            js_string(selector),
            js_string(&ch.to_string())
        );
        let value = self.session.evaluate(&expr).await.map_err(map_err)?;
        if value == Value::Bool(true) {
            Ok(())
        } else {
            Err(PageError::Javascript(format!(
                "typing target vanished: {}",
                selector
            )))
        }
    }

    async fn text(&self, selector: &str) -> Result<Option<String>, PageError> {
        let expr = format!("window.__reachbridge.text({})", js_string(selector));
        let value = self.session.evaluate(&expr).await.map_err(map_err)?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn enabled(&self, selector: &str) -> Result<bool, PageError> {
        let expr = format!("window.__reachbridge.enabled({})", js_string(selector));
        let value = self.session.evaluate(&expr).await.map_err(map_err)?;
        Ok(value == Value::Bool(true))
    }

    async fn eval_json(&self, expression: &str) -> Result<Value, PageError> {
        self.session.evaluate(expression).await.map_err(map_err)
    }

    async fn navigate(&self, url: &str) -> Result<(), PageError> {
        self.session.navigate(url).await.map_err(map_err)?;
        self.session
            .wait_ready(self.ready_timeout)
            .await
            .map_err(map_err)
    }

    async fn current_url(&self) -> Result<String, PageError> {
        self.session.current_url().await.map_err(map_err)
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("plain"), "\"plain\"");
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(js_string("line\nbreak"), "\"line\\nbreak\"");
    }
}
