//! Action dispatch and search-page scraping.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use reachbridge_protocols::{
    Action, ActionArgs, ConnectionDegree, DiscoveredProfile, FailureCode, Outcome, OutcomeData,
    SearchData, StopReason,
};

use crate::actions;
use crate::checks;
use crate::pacing::Pacing;
use crate::page::{PageDriver, PageError};
use crate::selectors::{find_role, Role};

/// One search page, as scraped. `captcha` short-circuits everything else.
#[derive(Debug, Clone)]
pub struct PageScrape {
    pub profiles: Vec<DiscoveredProfile>,
    pub next_present: bool,
    pub next_enabled: bool,
    pub captcha: bool,
}

/// Raw card record handed back by the in-page helper.
#[derive(Debug, Deserialize)]
struct RawCard {
    url: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    badge: String,
}

impl From<RawCard> for DiscoveredProfile {
    fn from(card: RawCard) -> Self {
        let none_if_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        DiscoveredProfile {
            degree: ConnectionDegree::from_badge(&card.badge),
            url: card.url,
            name: card.name,
            headline: none_if_empty(card.headline),
            location: none_if_empty(card.location),
        }
    }
}

/// The DOM action executor. Stateless apart from pacing policy; all page
/// state lives behind the [`PageDriver`].
pub struct Executor {
    pacing: Pacing,
}

impl Executor {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Run one action against the current page.
    ///
    /// `Ok(outcome)` covers both success and classified platform failures;
    /// `Err` is reserved for transport-level breakage the caller maps to its
    /// own taxonomy.
    pub async fn dispatch(
        &self,
        page: &dyn PageDriver,
        action: Action,
        args: &ActionArgs,
    ) -> Result<Outcome, PageError> {
        debug!(action = %action, "dispatching");
        match action {
            Action::Search => self.search_one_page(page).await,
            Action::DeepScan => actions::scan::run(page, args).await,
            Action::SendConnection => actions::connect::run(page, &self.pacing, args).await,
            Action::SendInmail => actions::inmail::run(page, &self.pacing, args).await,
            Action::CheckStatus => actions::status::run(page).await,
            Action::SendMessage => actions::message::run(page, &self.pacing, args).await,
            Action::Ping => actions::ping::run(page).await,
        }
    }

    /// Scrape the currently loaded search page. The multi-page loop above
    /// this calls it once per page and owns accumulation.
    pub async fn scrape_search_page(&self, page: &dyn PageDriver) -> Result<PageScrape, PageError> {
        if checks::captcha_blocked(page).await? {
            return Ok(PageScrape {
                profiles: Vec::new(),
                next_present: false,
                next_enabled: false,
                captcha: true,
            });
        }

        let card_group = Role::SearchResultCard.candidates().join(", ");
        let expression = format!(
            "window.__reachbridge.scrapeSearchCards({})",
            Value::String(card_group)
        );
        let raw = page.eval_json(&expression).await?;
        let cards: Vec<RawCard> = serde_json::from_value(raw)
            .map_err(|e| PageError::Javascript(format!("bad card payload: {}", e)))?;

        let (next_present, next_enabled) = match find_role(page, Role::NextPageButton).await? {
            Some(selector) => (true, page.enabled(selector).await?),
            None => (false, false),
        };

        Ok(PageScrape {
            profiles: cards.into_iter().map(Into::into).collect(),
            next_present,
            next_enabled,
            captcha: false,
        })
    }

    /// Single-page search as an action outcome.
    async fn search_one_page(&self, page: &dyn PageDriver) -> Result<Outcome, PageError> {
        let scrape = self.scrape_search_page(page).await?;
        if scrape.captcha {
            return Ok(Outcome::fail(
                FailureCode::Captcha,
                "challenge overlay on search page",
            ));
        }

        let stopped = if scrape.next_present && scrape.next_enabled {
            None
        } else {
            Some(StopReason::NoMorePages)
        };

        Ok(Outcome::ok(OutcomeData::Search(SearchData {
            profiles: scrape.profiles,
            pages_scraped: 1,
            stopped,
        })))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Pacing::default())
    }
}
