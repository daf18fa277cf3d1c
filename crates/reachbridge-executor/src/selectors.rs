//! Selector roles and their ranked fallback lists.
//!
//! The platform's markup is unstable; every DOM lookup tries an ordered
//! list of candidate selectors and the first match wins. Markup churn is
//! absorbed here, in data, not in action control flow.

use std::time::Duration;

use crate::page::{PageDriver, PageError};

/// A named UI element the executor can look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Primary connect control on a profile page.
    ConnectButton,
    /// Connect entry inside the overflow ("More") menu.
    ConnectMenuItem,
    /// Overflow menu trigger.
    OverflowMenu,
    /// "Add a note" button in the invite dialog.
    AddNoteButton,
    /// Note textarea in the invite dialog.
    NoteComposer,
    /// Send button of the invite dialog.
    SendInvite,
    /// Messaging control; its presence means the target is a connection.
    MessageButton,
    /// Conversation composer.
    MessageComposer,
    /// Send button of the conversation composer.
    MessageSend,
    /// Pending-invite indicator.
    PendingBadge,
    /// Premium messaging entry point.
    InmailButton,
    /// InMail subject field.
    InmailSubject,
    /// InMail body field.
    InmailBody,
    /// InMail send button.
    InmailSend,
    /// One result card on a search page.
    SearchResultCard,
    /// Next-page pagination control.
    NextPageButton,
    /// Human-verification challenge overlay.
    CaptchaOverlay,
    /// Login / auth wall.
    LoginWall,
    /// Weekly invitation cap modal.
    WeeklyLimitModal,
}

impl Role {
    /// Ranked candidate selectors, most reliable first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Role::ConnectButton => &[
                "button[aria-label*='Invite'][aria-label*='connect']",
                "main button[aria-label*='connect']",
                ".pv-top-card-v2-ctas button[aria-label*='Invite']",
                "button[data-control-name='connect']",
            ],
            Role::ConnectMenuItem => &[
                "div[role='menu'] [aria-label*='connect']",
                ".artdeco-dropdown__content li[aria-label*='Invite']",
                "div[data-control-name='connect']",
            ],
            Role::OverflowMenu => &[
                "main button[aria-label='More actions']",
                ".pv-top-card-v2-ctas button[aria-label*='More']",
                "button.artdeco-dropdown__trigger",
            ],
            Role::AddNoteButton => &[
                "button[aria-label='Add a note']",
                ".artdeco-modal button[aria-label*='note']",
            ],
            Role::NoteComposer => &[
                "textarea[name='message']",
                ".artdeco-modal textarea#custom-message",
                ".artdeco-modal textarea",
            ],
            Role::SendInvite => &[
                "button[aria-label='Send now']",
                "button[aria-label='Send invitation']",
                ".artdeco-modal button[aria-label*='Send']",
            ],
            Role::MessageButton => &[
                "main button[aria-label*='Message']",
                ".pv-top-card-v2-ctas a[href*='/messaging/']",
                "button[data-control-name='message']",
            ],
            Role::MessageComposer => &[
                "div.msg-form__contenteditable[contenteditable='true']",
                "div[role='textbox'][aria-label*='message']",
            ],
            Role::MessageSend => &[
                "button.msg-form__send-button",
                "button[type='submit'][aria-label*='Send']",
            ],
            Role::PendingBadge => &[
                "main button[aria-label*='Pending']",
                ".pv-top-card-v2-ctas button[aria-label*='Pending']",
                "span.artdeco-button__text[data-state='pending']",
            ],
            Role::InmailButton => &[
                "button[aria-label*='InMail']",
                "main a[href*='/inmail/']",
                ".pv-top-card-v2-ctas button[data-control-name='inmail']",
            ],
            Role::InmailSubject => &[
                "input[name='subject']",
                ".msg-form input[placeholder*='Subject']",
            ],
            Role::InmailBody => &[
                "div.msg-form__contenteditable[contenteditable='true']",
                ".msg-form textarea[name='body']",
            ],
            Role::InmailSend => &[
                "button.msg-form__send-button",
                ".msg-form button[type='submit']",
            ],
            Role::SearchResultCard => &[
                "li.reusable-search__result-container",
                "div[data-view-name='search-entity-result']",
                "ul.search-results__list > li",
            ],
            Role::NextPageButton => &[
                "button[aria-label='Next']",
                ".artdeco-pagination__button--next",
            ],
            Role::CaptchaOverlay => &[
                "#captcha-internal",
                "iframe[src*='captcha']",
                "form#challenge-form",
                ".challenge-dialog",
            ],
            Role::LoginWall => &[
                "form.login__form",
                "a[href*='/login']",
                ".authwall-join-form",
            ],
            Role::WeeklyLimitModal => &[
                ".artdeco-modal h2[id*='ip-fuse-limit']",
                ".artdeco-modal[aria-label*='weekly']",
            ],
        }
    }
}

/// Resolve a role on the current page. Returns the first candidate selector
/// that matches, or `None` when every candidate is absent. Absence is a
/// classification input, never an error.
pub async fn find_role(page: &dyn PageDriver, role: Role) -> Result<Option<&'static str>, PageError> {
    for selector in role.candidates() {
        if page.exists(selector).await? {
            return Ok(Some(selector));
        }
    }
    Ok(None)
}

/// Bounded observe-and-resolve wait for a role: resolves as soon as any
/// candidate appears, gives up after `timeout`.
pub async fn wait_for_role(
    page: &dyn PageDriver,
    role: Role,
    timeout: Duration,
) -> Result<Option<&'static str>, PageError> {
    let interval = Duration::from_millis(100);
    let mut waited = Duration::ZERO;

    loop {
        if let Some(selector) = find_role(page, role).await? {
            return Ok(Some(selector));
        }
        if waited >= timeout {
            return Ok(None);
        }
        page.pause(interval).await;
        waited += interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_candidates() {
        let roles = [
            Role::ConnectButton,
            Role::ConnectMenuItem,
            Role::OverflowMenu,
            Role::AddNoteButton,
            Role::NoteComposer,
            Role::SendInvite,
            Role::MessageButton,
            Role::MessageComposer,
            Role::MessageSend,
            Role::PendingBadge,
            Role::InmailButton,
            Role::InmailSubject,
            Role::InmailBody,
            Role::InmailSend,
            Role::SearchResultCard,
            Role::NextPageButton,
            Role::CaptchaOverlay,
            Role::LoginWall,
            Role::WeeklyLimitModal,
        ];
        for role in roles {
            assert!(!role.candidates().is_empty(), "{:?}", role);
        }
    }
}
