//! Command execution: tab acquisition, navigation, injection, dispatch.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, warn};

use reachbridge_browser::{find_platform_tab, CdpClient, CdpError};
use reachbridge_executor::{build_search_url, script, Executor, PageDriver};
use reachbridge_protocols::{
    Action, ActionArgs, Command, FailureCode, Outcome, OutcomeData, SearchData, StopReason,
};

use crate::page::CdpPage;

/// Per-command browser settings.
#[derive(Debug, Clone)]
pub struct ExecSettings {
    pub cdp_endpoint: String,
    pub platform_domain: String,
    pub ready_timeout: Duration,
    pub inject_retries: u32,
}

/// Run one claimed command end to end. Infallible by construction: every
/// failure mode maps to a coded outcome, and executor-level codes are never
/// rewritten on the way through.
pub async fn execute_command(
    settings: &ExecSettings,
    executor: &Executor,
    command: &Command,
) -> Outcome {
    let client = match CdpClient::connect(&settings.cdp_endpoint).await {
        Ok(client) => client,
        Err(e) => {
            return Outcome::fail(
                FailureCode::ContentScriptNotReady,
                format!("browser unreachable: {}", e),
            );
        }
    };

    let tab = match find_platform_tab(&client, &settings.platform_domain).await {
        Ok(tab) => tab,
        Err(CdpError::NoMatchingTab(domain)) => {
            return Outcome::fail(
                FailureCode::NoTabOpen,
                format!("open a {} tab and log in first", domain),
            );
        }
        Err(e) => {
            return Outcome::fail(FailureCode::ContentScriptNotReady, e.to_string());
        }
    };

    let session = match client.attach(&tab.id).await {
        Ok(session) => session,
        Err(e) => {
            return Outcome::fail(FailureCode::ContentScriptNotReady, e.to_string());
        }
    };
    let page = CdpPage::new(session, settings.ready_timeout);

    // A still-loading tab gets a bounded grace period, then we proceed with
    // whatever state it is in.
    if let Err(e) = page.session().wait_ready(settings.ready_timeout).await {
        debug!("tab not settled, proceeding anyway: {}", e);
    }

    let mut args = command.args.clone();

    // Profile-scoped actions: the agent navigates, the executor must not.
    if command.action != Action::Search {
        if let Some(url) = args.profile_url.clone() {
            let current = page.current_url().await.unwrap_or_default();
            if !same_page(&current, &url) {
                if let Err(e) = page.navigate(&url).await {
                    return Outcome::fail(FailureCode::NavigationFailed, e.to_string());
                }
            }
            args.skip_navigation = true;
        }
    }

    if let Err(outcome) = ensure_script(&page, settings.inject_retries).await {
        return outcome;
    }

    if command.action == Action::Search {
        return run_search(&page, executor, &args).await;
    }

    match executor.dispatch(&page, command.action, &args).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("page transport lost mid-action: {}", e);
            Outcome::fail(
                FailureCode::ContentScriptNotReady,
                format!("page transport lost mid-action: {}", e),
            )
        }
    }
}

/// URL equality up to a trailing slash. Avoids reloading the page (and
/// tearing down the helper script) when the tab is already on target.
fn same_page(current: &str, target: &str) -> bool {
    current.trim_end_matches('/') == target.trim_end_matches('/')
}

/// Install the helper bundle, verifying liveness, with bounded backoff
/// retries. Injection retry is an implementation necessity, not a business
/// retry.
async fn ensure_script(page: &dyn PageDriver, retries: u32) -> Result<(), Outcome> {
    for attempt in 0..retries.max(1) {
        if script::inject(page).await.is_ok() && matches!(script::alive(page).await, Ok(true)) {
            return Ok(());
        }
        page.pause(Duration::from_millis(200 * (attempt as u64 + 1)))
            .await;
    }
    Err(Outcome::fail(
        FailureCode::ContentScriptNotReady,
        "helper script will not take; refresh the tab",
    ))
}

/// Multi-page search driver. Pages are visited strictly in sequence; pages
/// already scraped are never discarded, an early stop just carries its
/// reason code.
pub async fn run_search(page: &dyn PageDriver, executor: &Executor, args: &ActionArgs) -> Outcome {
    let max_pages = args.max_pages.unwrap_or(1).max(1);
    let mut profiles = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut pages_scraped = 0u32;
    let mut stopped: Option<StopReason> = None;

    for page_no in 1..=max_pages {
        let url = build_search_url(&args.filters, page_no);
        debug!(page = page_no, %url, "search page");

        if page.navigate(&url).await.is_err() {
            if pages_scraped == 0 {
                return Outcome::fail(
                    FailureCode::NavigationFailed,
                    format!("could not open search page: {}", url),
                );
            }
            stopped = Some(StopReason::InjectionLost);
            break;
        }

        // Navigation tore down the previous document's helper.
        if script::inject(page).await.is_err()
            || !matches!(script::alive(page).await, Ok(true))
        {
            if pages_scraped == 0 {
                return Outcome::fail(
                    FailureCode::ContentScriptNotReady,
                    "helper script will not take; refresh the tab",
                );
            }
            stopped = Some(StopReason::InjectionLost);
            break;
        }

        let scrape = match executor.scrape_search_page(page).await {
            Ok(scrape) => scrape,
            Err(e) => {
                if pages_scraped == 0 {
                    return Outcome::fail(FailureCode::ContentScriptNotReady, e.to_string());
                }
                stopped = Some(StopReason::InjectionLost);
                break;
            }
        };

        if scrape.captcha {
            if pages_scraped == 0 {
                return Outcome::fail(
                    FailureCode::Captcha,
                    "challenge overlay on first search page",
                );
            }
            stopped = Some(StopReason::Captcha);
            break;
        }

        pages_scraped += 1;
        for profile in scrape.profiles {
            if seen.insert(profile.url.clone()) {
                profiles.push(profile);
            }
        }

        if let Some(target) = args.target_count {
            if profiles.len() as u32 >= target {
                stopped = Some(StopReason::TargetReached);
                break;
            }
        }
        if !scrape.next_present || !scrape.next_enabled {
            stopped = Some(StopReason::NoMorePages);
            break;
        }
    }

    Outcome::ok(OutcomeData::Search(SearchData {
        profiles,
        pages_scraped,
        stopped,
    }))
}

#[cfg(test)]
#[path = "execute_tests.rs"]
mod tests;
