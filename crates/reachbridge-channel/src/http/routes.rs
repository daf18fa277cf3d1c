//! HTTP route definitions.
//!
//! ```text
//! /api
//!   POST /api/commands      - Submit a command; held open until its Outcome
//!   GET  /api/agent/poll    - Agent claims the pending command, if any
//!   POST /api/agent/result  - Agent posts a command's Outcome
//!   GET  /api/status        - Connectivity flag + rate-limit counters
//!
//! /livez - Liveness probe
//! ```

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::channel::CommandChannel;
use crate::http::handlers;

/// Build the channel router.
pub fn create_router(channel: Arc<CommandChannel>) -> Router {
    let api_routes = Router::new()
        .route("/commands", post(handlers::submit_command))
        .route("/agent/poll", get(handlers::agent_poll))
        .route("/agent/result", post(handlers::agent_result))
        .route("/status", get(handlers::channel_status))
        .with_state(channel);

    Router::new()
        .nest("/api", api_routes)
        .route("/livez", get(handlers::liveness))
}
