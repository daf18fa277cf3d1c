//! Deep scan of the currently loaded profile page.

use serde::Deserialize;

use reachbridge_protocols::{
    ActionArgs, ConnectionDegree, FailureCode, Outcome, OutcomeData, ProfileDetails,
};

use crate::checks;
use crate::page::{PageDriver, PageError};

/// Raw extract handed back by the in-page helper.
#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    badge: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    about: String,
    #[serde(default)]
    experience: Vec<String>,
    #[serde(default)]
    posts: Vec<String>,
}

pub(crate) async fn run(page: &dyn PageDriver, args: &ActionArgs) -> Result<Outcome, PageError> {
    if checks::captcha_blocked(page).await? {
        return Ok(Outcome::fail(FailureCode::Captcha, "challenge overlay up"));
    }
    if !checks::logged_in(page).await? {
        return Ok(Outcome::fail(FailureCode::NotLoggedIn, "login wall shown"));
    }

    let raw = page.eval_json("window.__reachbridge.scrapeProfile()").await?;
    let profile: RawProfile = serde_json::from_value(raw)
        .map_err(|e| PageError::Javascript(format!("bad profile payload: {}", e)))?;

    if profile.name.is_empty() {
        return Ok(Outcome::fail(
            FailureCode::ControlNotFound,
            "profile markup not recognized on current page",
        ));
    }

    let url = match &args.profile_url {
        Some(url) => url.clone(),
        None => page.current_url().await?,
    };

    let none_if_empty = |s: String| if s.is_empty() { None } else { Some(s) };

    let details = ProfileDetails {
        url,
        name: profile.name,
        headline: none_if_empty(profile.headline),
        location: none_if_empty(profile.location),
        about: none_if_empty(profile.about),
        company: none_if_empty(profile.company),
        degree: if profile.badge.is_empty() {
            None
        } else {
            Some(ConnectionDegree::from_badge(&profile.badge))
        },
        experience: profile.experience.into_iter().take(3).collect(),
        recent_posts: profile.posts.into_iter().take(3).collect(),
    };

    Ok(Outcome::ok(OutcomeData::Profile(details)))
}
