//! The browser-side agent.
//!
//! Polls the command channel on a fixed interval, claims one command at a
//! time, drives the platform tab through the executor, and posts exactly one
//! outcome per claimed command. The agent attaches to the user's existing
//! tab; it never opens or closes one.

pub mod agent;
pub mod client;
pub mod error;
pub mod execute;
pub mod page;

pub use agent::{AgentSettings, ConnState, ExtensionAgent};
pub use client::ChannelClient;
pub use error::AgentError;
pub use page::CdpPage;
