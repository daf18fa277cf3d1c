//! People-search URL construction from structured filters.

use url::form_urlencoded;

use reachbridge_protocols::{ConnectionDegree, SearchFilters};

const SEARCH_BASE: &str = "https://www.linkedin.com/search/results/people/";

/// Build the search URL for one result page. Pages are 1-based.
pub fn build_search_url(filters: &SearchFilters, page: u32) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    // The platform folds free-text filters into one keywords parameter.
    let keywords: Vec<&str> = [
        filters.keywords.as_deref(),
        filters.title.as_deref(),
        filters.location.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    if !keywords.is_empty() {
        query.append_pair("keywords", &keywords.join(" "));
    }

    if let Some(network) = filters.degree.and_then(network_code) {
        query.append_pair("network", &format!("[\"{}\"]", network));
    }

    if page > 1 {
        query.append_pair("page", &page.to_string());
    }

    let query = query.finish();
    if query.is_empty() {
        SEARCH_BASE.to_string()
    } else {
        format!("{}?{}", SEARCH_BASE, query)
    }
}

fn network_code(degree: ConnectionDegree) -> Option<&'static str> {
    match degree {
        ConnectionDegree::First => Some("F"),
        ConnectionDegree::Second => Some("S"),
        ConnectionDegree::Third => Some("O"),
        ConnectionDegree::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_encoded() {
        let filters = SearchFilters {
            keywords: Some("rust engineer".to_string()),
            ..Default::default()
        };
        let url = build_search_url(&filters, 1);
        assert_eq!(
            url,
            "https://www.linkedin.com/search/results/people/?keywords=rust+engineer"
        );
    }

    #[test]
    fn test_title_and_location_fold_into_keywords() {
        let filters = SearchFilters {
            keywords: Some("fintech".to_string()),
            title: Some("CTO".to_string()),
            location: Some("Berlin".to_string()),
            ..Default::default()
        };
        let url = build_search_url(&filters, 1);
        assert!(url.contains("keywords=fintech+CTO+Berlin"));
    }

    #[test]
    fn test_page_parameter_only_past_first() {
        let filters = SearchFilters {
            keywords: Some("sales".to_string()),
            ..Default::default()
        };
        assert!(!build_search_url(&filters, 1).contains("page="));
        assert!(build_search_url(&filters, 3).contains("page=3"));
    }

    #[test]
    fn test_degree_maps_to_network_facet() {
        let filters = SearchFilters {
            degree: Some(ConnectionDegree::Second),
            ..Default::default()
        };
        let url = build_search_url(&filters, 1);
        assert!(url.contains("network="));
        assert!(url.contains("S"));
    }

    #[test]
    fn test_empty_filters() {
        assert_eq!(
            build_search_url(&SearchFilters::default(), 1),
            "https://www.linkedin.com/search/results/people/"
        );
    }
}
