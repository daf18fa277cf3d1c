//! Chrome DevTools Protocol transport.
//!
//! Connects to an already-running Chrome with remote debugging enabled,
//! discovers the platform tab, and exposes a [`PageSession`] for script
//! evaluation and navigation on that tab. This crate never opens or closes
//! tabs; the user's browsing session is the contract.

pub mod client;
pub mod error;
pub mod protocol;
pub mod session;
pub mod tabs;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::{BrowserVersion, PageInfo};
pub use session::PageSession;
pub use tabs::find_platform_tab;
