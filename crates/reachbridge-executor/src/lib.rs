//! DOM action executor.
//!
//! Runs outreach actions against a live page through the [`PageDriver`]
//! capability seam. Every DOM lookup goes through a selector role with a
//! ranked fallback list, clicks and typing are wrapped in jittered human
//! pacing, and platform conditions (CAPTCHA, login wall, weekly invite cap)
//! are classified into the closed failure taxonomy rather than collapsed
//! into generic errors.

pub mod actions;
pub mod checks;
pub mod executor;
pub mod pacing;
pub mod page;
pub mod script;
pub mod search_url;
pub mod selectors;

pub use executor::{Executor, PageScrape};
pub use pacing::Pacing;
pub use page::{PageDriver, PageError};
pub use search_url::build_search_url;
pub use selectors::Role;
