//! The command channel: a local, single-process broker between callers and
//! the browser agent.
//!
//! One command is in flight at a time. Callers submit and await; the agent
//! polls, claims, and posts results; correlation is by command id with an
//! action-dependent timeout. Rate-limit accounting happens here, exactly
//! once, only on confirmed success.

pub mod channel;
pub mod http;
pub mod server;

pub use channel::{ChannelStatus, ChannelTiming, CommandChannel};
pub use server::{RelayConfig, RelayServer};
