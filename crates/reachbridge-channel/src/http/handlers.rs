//! Channel API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use reachbridge_limits::LimitSnapshot;
use reachbridge_protocols::{Action, ActionArgs, Command, Outcome};

use crate::channel::CommandChannel;

/// Caller-facing submission body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub action: Action,
    #[serde(default)]
    pub args: ActionArgs,
}

/// Poll response: the claimed command, or null when the slot is empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct PollResponse {
    pub command: Option<Command>,
}

/// Agent-facing result body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultPost {
    pub id: Uuid,
    pub outcome: Outcome,
}

/// Status response: bridge connectivity plus current counters.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub agent_connected: bool,
    pub busy: bool,
    pub limits: LimitSnapshot,
}

/// POST /api/commands: submit and wait for resolution.
pub async fn submit_command(
    State(channel): State<Arc<CommandChannel>>,
    Json(req): Json<SubmitRequest>,
) -> Json<Outcome> {
    info!(action = %req.action, "command submitted");
    let outcome = channel.submit(req.action, req.args).await;
    Json(outcome)
}

/// GET /api/agent/poll: claim the pending command.
pub async fn agent_poll(State(channel): State<Arc<CommandChannel>>) -> Json<PollResponse> {
    Json(PollResponse {
        command: channel.poll(),
    })
}

/// POST /api/agent/result: resolve a command. Always 204: duplicate or
/// late posts are deliberately indistinguishable from accepted ones.
pub async fn agent_result(
    State(channel): State<Arc<CommandChannel>>,
    Json(post): Json<ResultPost>,
) -> StatusCode {
    channel.post_result(post.id, post.outcome);
    StatusCode::NO_CONTENT
}

/// GET /api/status
pub async fn channel_status(State(channel): State<Arc<CommandChannel>>) -> Json<StatusResponse> {
    let status = channel.status();
    Json(StatusResponse {
        agent_connected: status.agent_connected,
        busy: status.busy,
        limits: status.limits,
    })
}

/// GET /livez
pub async fn liveness() -> &'static str {
    "ok"
}
