//! Configuration for the ReachBridge relay.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    BrowserConfig, ChannelTimingConfig, Config, LimitsConfig, PacingConfig, ServerConfig,
};
