//! Direct message to an accepted connection.

use reachbridge_protocols::{ActionArgs, FailureCode, Outcome, OutcomeData};

use crate::checks;
use crate::pacing::{type_text, Pacing};
use crate::page::{PageDriver, PageError};
use crate::selectors::{find_role, wait_for_role, Role};

pub(crate) async fn run(
    page: &dyn PageDriver,
    pacing: &Pacing,
    args: &ActionArgs,
) -> Result<Outcome, PageError> {
    if checks::captcha_blocked(page).await? {
        return Ok(Outcome::fail(FailureCode::Captcha, "challenge overlay up"));
    }
    if !checks::logged_in(page).await? {
        return Ok(Outcome::fail(FailureCode::NotLoggedIn, "login wall shown"));
    }

    // A missing messaging control means the target is not an accepted
    // connection.
    let Some(button) = find_role(page, Role::MessageButton).await? else {
        return Ok(Outcome::fail(
            FailureCode::NoMessageButton,
            "no messaging control; target is not a connection",
        ));
    };

    page.pause(pacing.action_jitter()).await;
    page.click(button).await?;

    let Some(composer) = wait_for_role(page, Role::MessageComposer, pacing.wait_timeout).await?
    else {
        return Ok(Outcome::fail(
            FailureCode::ControlNotFound,
            "conversation composer did not appear",
        ));
    };

    let body = args.message.clone().unwrap_or_default();
    type_text(page, pacing, composer, &body).await?;

    let Some(send) = wait_for_role(page, Role::MessageSend, pacing.wait_timeout).await? else {
        return Ok(Outcome::fail(
            FailureCode::ControlNotFound,
            "message send button did not appear",
        ));
    };
    page.pause(pacing.action_jitter()).await;
    page.click(send).await?;

    if checks::captcha_blocked(page).await? {
        return Ok(Outcome::fail(
            FailureCode::Captcha,
            "challenge overlay after submit",
        ));
    }

    Ok(Outcome::ok(OutcomeData::Message { sent: body }))
}
