//! Cross-cutting platform-condition checks.

use crate::page::{PageDriver, PageError};
use crate::selectors::{find_role, Role};

/// Whether a human-verification overlay is blocking the page. Checked at
/// action start and again right after every submitting interaction; the
/// platform interjects challenges mid-flow, not only at load.
pub async fn captcha_blocked(page: &dyn PageDriver) -> Result<bool, PageError> {
    Ok(find_role(page, Role::CaptchaOverlay).await?.is_some())
}

/// Whether the session appears authenticated.
pub async fn logged_in(page: &dyn PageDriver) -> Result<bool, PageError> {
    Ok(find_role(page, Role::LoginWall).await?.is_none())
}

/// Whether the platform's weekly invitation cap modal is showing.
pub async fn weekly_limit_shown(page: &dyn PageDriver) -> Result<bool, PageError> {
    Ok(find_role(page, Role::WeeklyLimitModal).await?.is_some())
}
