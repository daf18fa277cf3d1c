//! Platform tab discovery.

use tracing::debug;

use crate::client::CdpClient;
use crate::error::CdpError;
use crate::protocol::PageInfo;

/// True when the page URL sits on `domain` or one of its subdomains.
pub fn matches_domain(url: &str, domain: &str) -> bool {
    let Ok(parsed) = url::Url::parse(url) else {
        return false;
    };
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }
    match parsed.host_str() {
        Some(host) => host == domain || host.ends_with(&format!(".{}", domain)),
        None => false,
    }
}

/// Find the first open tab on the platform domain.
///
/// The bridge never opens a tab itself, so an empty result is a terminal
/// condition for the caller, not something to recover from here.
pub async fn find_platform_tab(client: &CdpClient, domain: &str) -> Result<PageInfo, CdpError> {
    let pages = client.list_pages().await?;

    let found = pages
        .into_iter()
        .filter(|p| p.page_type == "page")
        .find(|p| matches_domain(&p.url, domain));

    match found {
        Some(page) => {
            debug!("Platform tab: {} ({})", page.url, page.id);
            Ok(page)
        }
        None => Err(CdpError::NoMatchingTab(domain.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact_domain() {
        assert!(matches_domain("https://linkedin.com/feed/", "linkedin.com"));
    }

    #[test]
    fn test_matches_subdomain() {
        assert!(matches_domain(
            "https://www.linkedin.com/in/someone/",
            "linkedin.com"
        ));
    }

    #[test]
    fn test_rejects_lookalike_domain() {
        assert!(!matches_domain(
            "https://notlinkedin.com/in/someone/",
            "linkedin.com"
        ));
        assert!(!matches_domain(
            "https://linkedin.com.evil.example/",
            "linkedin.com"
        ));
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(!matches_domain("chrome://extensions/", "linkedin.com"));
        assert!(!matches_domain("devtools://devtools/", "linkedin.com"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!matches_domain("not a url", "linkedin.com"));
        assert!(!matches_domain("", "linkedin.com"));
    }
}
