//! Shared protocol types for the ReachBridge relay.
//!
//! Everything that crosses a process boundary lives here: the [`Command`]
//! submitted by a caller, the [`Outcome`] posted back by the browser agent,
//! and the closed [`FailureCode`] taxonomy both sides agree on.

pub mod action;
pub mod command;
pub mod outcome;
pub mod profile;

pub use action::{Action, ActionArgs, SearchFilters};
pub use command::Command;
pub use outcome::{FailureCode, Outcome, OutcomeData, PingData, SearchData, StopReason};
pub use profile::{ConnectionDegree, ConnectionStatus, DiscoveredProfile, ProfileDetails};
