//! HTTP client for the command channel.
//!
//! Used from two sides: the agent (poll, post results) and orchestrating
//! callers (submit, status).

use uuid::Uuid;

use reachbridge_channel::http::handlers::{
    PollResponse, ResultPost, StatusResponse, SubmitRequest,
};
use reachbridge_protocols::{Action, ActionArgs, Command, Outcome};

use crate::error::AgentError;

/// Client for the relay's `/api` surface.
#[derive(Debug, Clone)]
pub struct ChannelClient {
    http: reqwest::Client,
    base: String,
}

impl ChannelClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("{}/api", base_url.trim_end_matches('/')),
        }
    }

    /// Claim the pending command, if any.
    pub async fn poll(&self) -> Result<Option<Command>, AgentError> {
        let resp: PollResponse = self
            .http
            .get(format!("{}/agent/poll", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.command)
    }

    /// Post a command's outcome. The channel treats duplicates and late
    /// posts as no-ops, so this is safe to retry.
    pub async fn post_result(&self, id: Uuid, outcome: Outcome) -> Result<(), AgentError> {
        self.http
            .post(format!("{}/agent/result", self.base))
            .json(&ResultPost { id, outcome })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Submit a command and wait for its outcome. The request stays open
    /// until the channel resolves, so the HTTP timeout must exceed the
    /// channel's own resolution windows; none is set here.
    pub async fn submit(&self, action: Action, args: ActionArgs) -> Result<Outcome, AgentError> {
        let outcome: Outcome = self
            .http
            .post(format!("{}/commands", self.base))
            .json(&SubmitRequest { action, args })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(outcome)
    }

    /// Bridge connectivity and quota counters.
    pub async fn status(&self) -> Result<StatusResponse, AgentError> {
        let status: StatusResponse = self
            .http
            .get(format!("{}/status", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = ChannelClient::new("http://127.0.0.1:3000/");
        assert_eq!(client.base, "http://127.0.0.1:3000/api");
    }
}
