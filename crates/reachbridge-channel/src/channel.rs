//! Core channel state machine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use reachbridge_limits::{LimitSnapshot, RateLimiter};
use reachbridge_protocols::{Action, ActionArgs, Command, FailureCode, Outcome};

/// Channel-side timing knobs.
#[derive(Debug, Clone, Copy)]
pub struct ChannelTiming {
    /// Resolution window for single-click actions.
    pub standard_timeout: Duration,
    /// Resolution window for multi-page search actions.
    pub search_timeout: Duration,
    /// A poll within this window counts as "agent connected".
    pub agent_fresh: Duration,
}

impl Default for ChannelTiming {
    fn default() -> Self {
        Self {
            standard_timeout: Duration::from_millis(120_000),
            search_timeout: Duration::from_millis(600_000),
            agent_fresh: Duration::from_millis(10_000),
        }
    }
}

/// Connectivity and quota view for the status endpoint.
#[derive(Debug, Clone)]
pub struct ChannelStatus {
    pub agent_connected: bool,
    pub busy: bool,
    pub limits: LimitSnapshot,
}

/// All mutable channel state, owned by the channel instance (no ambient
/// globals) so independent channels coexist in tests.
struct ChannelState {
    /// The single pending slot: queued but not yet claimed by a poll.
    pending: Option<Command>,
    /// Correlation table: command id to its caller's resolver.
    waiters: HashMap<Uuid, oneshot::Sender<Outcome>>,
    last_poll: Option<Instant>,
}

/// The command channel.
///
/// Invariant: every submitted command yields exactly one [`Outcome`] to its
/// caller, whether a posted result, a classified rejection, or a timeout. Late or
/// duplicate posts are ignored, never an error.
pub struct CommandChannel {
    state: Mutex<ChannelState>,
    limiter: Arc<RateLimiter>,
    timing: ChannelTiming,
}

impl CommandChannel {
    pub fn new(limiter: Arc<RateLimiter>, timing: ChannelTiming) -> Self {
        Self {
            state: Mutex::new(ChannelState {
                pending: None,
                waiters: HashMap::new(),
                last_poll: None,
            }),
            limiter,
            timing,
        }
    }

    fn window_for(&self, action: Action) -> Duration {
        if action.is_long_running() {
            self.timing.search_timeout
        } else {
            self.timing.standard_timeout
        }
    }

    /// Submit one command and wait for its outcome.
    ///
    /// Rejects immediately with `CHANNEL_BUSY` if a command is already in
    /// flight (submissions are not queued), and with `RATE_LIMITED` if the
    /// quota probe fails. In neither case does the command become visible
    /// to `poll`.
    pub async fn submit(&self, action: Action, args: ActionArgs) -> Outcome {
        let verdict = self.limiter.allowed(action);
        if !verdict.ok {
            return Outcome::fail(
                FailureCode::RateLimited,
                verdict.reason.unwrap_or_else(|| "quota exceeded".into()),
            );
        }

        let command = Command::new(action, args);
        let (tx, rx) = oneshot::channel();
        {
            let mut state = self.state.lock();
            if state.pending.is_some() || !state.waiters.is_empty() {
                return Outcome::fail(
                    FailureCode::ChannelBusy,
                    "another command is in flight; submissions are not queued",
                );
            }
            state.waiters.insert(command.id, tx);
            state.pending = Some(command.clone());
        }
        debug!(id = %command.id, action = %action, "command queued");

        match tokio::time::timeout(self.window_for(action), rx).await {
            Ok(Ok(outcome)) => {
                if outcome.success {
                    if let Err(e) = self.limiter.record(action).await {
                        warn!(id = %command.id, "failed to persist rate-limit state: {}", e);
                    }
                }
                outcome
            }
            // Sender dropped without a result; treat as the channel going away.
            Ok(Err(_)) => Outcome::fail(FailureCode::Timeout, "result channel closed"),
            Err(_) => {
                self.abandon(command.id);
                Outcome::fail(
                    FailureCode::Timeout,
                    format!(
                        "no result within {}ms; outcome unknown, re-check status before retrying",
                        self.window_for(action).as_millis()
                    ),
                )
            }
        }
    }

    /// Drop the correlation entry (and the pending slot, if still ours)
    /// after a timeout. A result posted later finds nothing and is ignored.
    fn abandon(&self, id: Uuid) {
        let mut state = self.state.lock();
        state.waiters.remove(&id);
        if state.pending.as_ref().map(|c| c.id) == Some(id) {
            state.pending = None;
        }
    }

    /// Non-blocking claim: atomically take-and-clear the pending slot so no
    /// two pollers can claim the same command. Also refreshes the agent
    /// liveness timestamp.
    pub fn poll(&self) -> Option<Command> {
        let mut state = self.state.lock();
        state.last_poll = Some(Instant::now());
        let claimed = state.pending.take();
        if let Some(ref cmd) = claimed {
            debug!(id = %cmd.id, "command claimed by agent");
        }
        claimed
    }

    /// Resolve the waiting caller. Unknown or already-resolved ids are a
    /// logged no-op: late posts after a timeout must never raise.
    pub fn post_result(&self, id: Uuid, outcome: Outcome) {
        let waiter = self.state.lock().waiters.remove(&id);
        match waiter {
            Some(tx) => {
                // The caller may have vanished between timeout and send.
                let _ = tx.send(outcome);
            }
            None => debug!(%id, "discarding result for unknown or resolved command"),
        }
    }

    pub fn status(&self) -> ChannelStatus {
        let state = self.state.lock();
        let agent_connected = state
            .last_poll
            .is_some_and(|at| at.elapsed() <= self.timing.agent_fresh);
        ChannelStatus {
            agent_connected,
            busy: !state.waiters.is_empty(),
            limits: self.limiter.snapshot(),
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
