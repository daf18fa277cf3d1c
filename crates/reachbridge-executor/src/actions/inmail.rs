//! Premium InMail.

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

    // The premium entry point missing is an account-tier signal, reported
    // distinctly from a transient not-found.
    let Some(entry) = find_role(page, Role::InmailButton).await? else {
        return Ok(Outcome::fail(
            FailureCode::NoInmailButton,
            "premium messaging entry point absent",
        ));
    };

    page.pause(pacing.action_jitter()).await;
    page.click(entry).await?;

    let body = args.message.clone().unwrap_or_default();

    if let Some(subject) = args.subject.as_deref().filter(|s| !s.is_empty()) {
        let Some(field) = wait_for_role(page, Role::InmailSubject, pacing.wait_timeout).await?
        else {
            return Ok(Outcome::fail(
                FailureCode::ControlNotFound,
                "InMail subject field did not appear",
            ));
        };
        type_text(page, pacing, field, subject).await?;
    }

    let Some(composer) = wait_for_role(page, Role::InmailBody, pacing.wait_timeout).await? else {
        return Ok(Outcome::fail(
            FailureCode::ControlNotFound,
            "InMail body field did not appear",
        ));
    };
    type_text(page, pacing, composer, &body).await?;

    let Some(send) = wait_for_role(page, Role::InmailSend, pacing.wait_timeout).await? else {
        return Ok(Outcome::fail(
            FailureCode::ControlNotFound,
            "InMail send button did not appear",
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
