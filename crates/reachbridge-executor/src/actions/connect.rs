//! Connection request.

use tracing::debug;

use reachbridge_protocols::{ActionArgs, FailureCode, Outcome, OutcomeData};

use crate::checks;
use crate::pacing::{type_text, Pacing};
use crate::page::{PageDriver, PageError};
use crate::selectors::{find_role, wait_for_role, Role};

use super::{truncate_with_marker, NOTE_LIMIT};

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
    // The weekly cap modal can already be up from a previous invite; don't
    // burn a click finding out.
    if checks::weekly_limit_shown(page).await? {
        return Ok(Outcome::fail(
            FailureCode::WeeklyLimit,
            "weekly invitation cap modal shown",
        ));
    }

    let Some(connect) = locate_connect_control(page, pacing).await? else {
        return Ok(classify_missing_connect(page).await?);
    };

    page.pause(pacing.action_jitter()).await;
    page.click(connect).await?;

    // Clicking can surface the weekly cap instead of the invite dialog.
    if checks::weekly_limit_shown(page).await? {
        return Ok(Outcome::fail(
            FailureCode::WeeklyLimit,
            "weekly invitation cap reached",
        ));
    }

    let sent_note = match args.note.as_deref() {
        Some(note) if !note.is_empty() => {
            let note = truncate_with_marker(note, NOTE_LIMIT);
            let Some(add_note) = wait_for_role(page, Role::AddNoteButton, pacing.wait_timeout).await?
            else {
                return Ok(Outcome::fail(
                    FailureCode::ControlNotFound,
                    "invite dialog has no note option",
                ));
            };
            page.pause(pacing.action_jitter()).await;
            page.click(add_note).await?;

            let Some(composer) = wait_for_role(page, Role::NoteComposer, pacing.wait_timeout).await?
            else {
                return Ok(Outcome::fail(
                    FailureCode::ControlNotFound,
                    "note composer did not appear",
                ));
            };
            type_text(page, pacing, composer, &note).await?;
            Some(note)
        }
        _ => None,
    };

    let Some(send) = wait_for_role(page, Role::SendInvite, pacing.wait_timeout).await? else {
        return Ok(Outcome::fail(
            FailureCode::ControlNotFound,
            "invite send button did not appear",
        ));
    };
    page.pause(pacing.action_jitter()).await;
    page.click(send).await?;

    // The platform interjects challenges after the submit, not only at load.
    if checks::captcha_blocked(page).await? {
        return Ok(Outcome::fail(
            FailureCode::Captcha,
            "challenge overlay after submit",
        ));
    }

    debug!(with_note = sent_note.is_some(), "connection request sent");
    Ok(match sent_note {
        Some(note) => Outcome::ok(OutcomeData::Message { sent: note }),
        None => Outcome::ok_empty(),
    })
}

/// Find the connect control: the primary button first, then the overflow
/// menu.
async fn locate_connect_control(
    page: &dyn PageDriver,
    pacing: &Pacing,
) -> Result<Option<&'static str>, PageError> {
    if let Some(selector) = find_role(page, Role::ConnectButton).await? {
        return Ok(Some(selector));
    }

    let Some(menu) = find_role(page, Role::OverflowMenu).await? else {
        return Ok(None);
    };
    page.pause(pacing.action_jitter()).await;
    page.click(menu).await?;

    wait_for_role(page, Role::ConnectMenuItem, pacing.wait_timeout).await
}

/// No connect control anywhere: three distinct answers, never conflated.
async fn classify_missing_connect(page: &dyn PageDriver) -> Result<Outcome, PageError> {
    if find_role(page, Role::MessageButton).await?.is_some() {
        return Ok(Outcome::fail(
            FailureCode::AlreadyConnected,
            "messaging control present instead of connect",
        ));
    }
    if find_role(page, Role::PendingBadge).await?.is_some() {
        return Ok(Outcome::fail(
            FailureCode::Pending,
            "invite already outstanding",
        ));
    }
    Ok(Outcome::fail(
        FailureCode::NoConnectButton,
        "no connect control on page or in overflow menu",
    ))
}
