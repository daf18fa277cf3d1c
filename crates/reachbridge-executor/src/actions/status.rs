//! Connection-state inspection of the current profile page.

use reachbridge_protocols::{ConnectionStatus, FailureCode, Outcome, OutcomeData};

use crate::checks;
use crate::page::{PageDriver, PageError};
use crate::selectors::{find_role, Role};

pub(crate) async fn run(page: &dyn PageDriver) -> Result<Outcome, PageError> {
    if checks::captcha_blocked(page).await? {
        return Ok(Outcome::fail(FailureCode::Captcha, "challenge overlay up"));
    }
    if !checks::logged_in(page).await? {
        return Ok(Outcome::fail(FailureCode::NotLoggedIn, "login wall shown"));
    }

    // Absence of all three recognizable controls is an explicit Unknown,
    // never guessed into one of the other states.
    let status = if find_role(page, Role::MessageButton).await?.is_some() {
        ConnectionStatus::Accepted
    } else if find_role(page, Role::PendingBadge).await?.is_some() {
        ConnectionStatus::Pending
    } else if find_role(page, Role::ConnectButton).await?.is_some() {
        ConnectionStatus::NotConnected
    } else {
        ConnectionStatus::Unknown
    };

    Ok(Outcome::ok(OutcomeData::Status { status }))
}
