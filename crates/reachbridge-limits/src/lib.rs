//! Rate limiting for outreach actions.
//!
//! Counters are tracked per action category, reset lazily on date rollover
//! (no background timers), and persisted synchronously on every successful
//! action so counts survive process restarts.

pub mod error;
pub mod limiter;
pub mod state;

pub use error::LimitError;
pub use limiter::{ActionCategory, Allowance, LimitCaps, LimitSnapshot, RateLimiter};
pub use state::{FileStateStore, LimitState, MemoryStateStore, StateStore};
