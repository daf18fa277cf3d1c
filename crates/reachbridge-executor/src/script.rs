//! The in-page helper bundle.

use serde_json::Value;

use crate::page::{PageDriver, PageError};

/// The helper bundle source. Evaluating it installs `window.__reachbridge`
/// and returns `true`; evaluating it again is a no-op.
pub const HELPER_BUNDLE: &str = include_str!("helper.js");

/// Expression used as the liveness ping.
pub const ALIVE_PROBE: &str = "window.__reachbridge && window.__reachbridge.v === 1";

/// Install the helper bundle into the current document.
pub async fn inject(page: &dyn PageDriver) -> Result<(), PageError> {
    page.eval_json(HELPER_BUNDLE).await?;
    Ok(())
}

/// Cheap liveness check: the bundle does not survive navigation, so a dead
/// probe means the document changed underneath us.
pub async fn alive(page: &dyn PageDriver) -> Result<bool, PageError> {
    let value = page.eval_json(ALIVE_PROBE).await?;
    Ok(value == Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_installs_marker() {
        assert!(HELPER_BUNDLE.contains("window.__reachbridge"));
        assert!(HELPER_BUNDLE.contains("v: 1"));
    }

    #[test]
    fn test_probe_matches_bundle_marker() {
        assert!(ALIVE_PROBE.contains("__reachbridge"));
    }
}
