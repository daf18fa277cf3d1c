//! Liveness probe.

use reachbridge_protocols::{Outcome, OutcomeData, PingData};

use crate::checks;
use crate::page::{PageDriver, PageError};

/// Always succeeds when the page is reachable; the payload carries session
/// health, it does not gate on it.
pub(crate) async fn run(page: &dyn PageDriver) -> Result<Outcome, PageError> {
    let captcha_blocked = checks::captcha_blocked(page).await?;
    let authenticated = checks::logged_in(page).await?;

    Ok(Outcome::ok(OutcomeData::Ping(PingData {
        authenticated,
        captcha_blocked,
    })))
}
