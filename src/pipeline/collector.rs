use std::time::Duration;

use tracing::debug;

use crate::places::types::Place;
use crate::places::{PlacesError, SearchProvider};

/// Largest page the text-search endpoint will serve.
pub const PROVIDER_PAGE_SIZE: usize = 20;

/// The next page is not available immediately after its token is issued.
const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Pages through text-search results for one query until `target`
/// candidates are collected or the provider runs out. The delay between
/// page fetches is skipped once the target is met, and never precedes the
/// first fetch.
pub async fn collect_candidates(
    provider: &impl SearchProvider,
    query: &str,
    target: usize,
) -> Result<Vec<Place>, PlacesError> {
    let mut collected: Vec<Place> = Vec::new();
    let mut token: Option<String> = None;

    while collected.len() < target {
        let remaining = target - collected.len();
        let page_size = remaining.min(PROVIDER_PAGE_SIZE) as u8;
        let page = provider.search(query, token.as_deref(), page_size).await?;

        let got = page.places.len();
        collected.extend(page.places);
        token = page.next_page_token;
        debug!(query, got, total = collected.len(), "search page collected");

        if token.is_none() || got == 0 {
            break;
        }
        if collected.len() < target {
            tokio::time::sleep(PAGE_DELAY).await;
        }
    }

    collected.truncate(target);
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::places::types::SearchPage;

    struct PagedSearch {
        pages: Mutex<VecDeque<Result<SearchPage, PlacesError>>>,
        requests: Mutex<Vec<(Option<String>, u8)>>,
    }

    impl PagedSearch {
        fn with_pages(pages: Vec<SearchPage>) -> Self {
            Self {
                pages: Mutex::new(pages.into_iter().map(Ok).collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: PlacesError) -> Self {
            Self {
                pages: Mutex::new(VecDeque::from([Err(error)])),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn captured_requests(&self) -> Vec<(Option<String>, u8)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl SearchProvider for PagedSearch {
        async fn search(
            &self,
            _query: &str,
            page_token: Option<&str>,
            page_size: u8,
        ) -> Result<SearchPage, PlacesError> {
            self.requests
                .lock()
                .unwrap()
                .push((page_token.map(str::to_string), page_size));
            self.pages.lock().unwrap().pop_front().unwrap_or(Ok(SearchPage {
                places: vec![],
                next_page_token: None,
            }))
        }
    }

    fn places(count: usize, prefix: &str) -> Vec<Place> {
        (0..count)
            .map(|i| Place {
                id: Some(format!("{prefix}-{i}")),
                name: None,
                display_name: None,
                formatted_address: None,
                google_maps_uri: None,
                location: None,
                primary_type: None,
            })
            .collect()
    }

    fn page(count: usize, prefix: &str, next: Option<&str>) -> SearchPage {
        SearchPage {
            places: places(count, prefix),
            next_page_token: next.map(str::to_string),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn caps_at_target_with_two_delays_across_three_pages() {
        // 45 candidates in pages of 15; target 40 needs all three pages but
        // only two inter-page waits.
        let provider = PagedSearch::with_pages(vec![
            page(15, "a", Some("tok-1")),
            page(15, "b", Some("tok-2")),
            page(15, "c", Some("tok-3")),
        ]);

        let start = tokio::time::Instant::now();
        let collected = collect_candidates(&provider, "cafe in Dafni", 40)
            .await
            .unwrap();

        assert_eq!(collected.len(), 40);
        assert_eq!(start.elapsed(), Duration::from_secs(2));

        let requests = provider.captured_requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], (None, 20));
        assert_eq!(requests[1], (Some("tok-1".into()), 20));
        assert_eq!(requests[2], (Some("tok-2".into()), 10));
    }

    #[tokio::test(start_paused = true)]
    async fn no_delay_when_first_page_suffices() {
        let provider = PagedSearch::with_pages(vec![page(20, "a", Some("tok-1"))]);

        let start = tokio::time::Instant::now();
        let collected = collect_candidates(&provider, "q", 20).await.unwrap();

        assert_eq!(collected.len(), 20);
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(provider.captured_requests().len(), 1);
    }

    #[tokio::test]
    async fn stops_when_no_continuation_token() {
        let provider = PagedSearch::with_pages(vec![page(5, "a", None)]);

        let collected = collect_candidates(&provider, "q", 40).await.unwrap();

        assert_eq!(collected.len(), 5);
        assert_eq!(provider.captured_requests().len(), 1);
    }

    #[tokio::test]
    async fn stops_on_empty_page_despite_token() {
        let provider = PagedSearch::with_pages(vec![
            page(10, "a", Some("tok-1")),
            page(0, "b", Some("tok-2")),
        ]);

        let collected = collect_candidates(&provider, "q", 40).await.unwrap();

        assert_eq!(collected.len(), 10);
        assert_eq!(provider.captured_requests().len(), 2);
    }

    #[tokio::test]
    async fn zero_target_issues_no_requests() {
        let provider = PagedSearch::with_pages(vec![page(10, "a", None)]);

        let collected = collect_candidates(&provider, "q", 0).await.unwrap();

        assert!(collected.is_empty());
        assert!(provider.captured_requests().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let provider = PagedSearch::failing(PlacesError::Api {
            code: 500,
            message: "boom".into(),
        });

        let result = collect_candidates(&provider, "q", 40).await;
        assert!(matches!(result, Err(PlacesError::Api { code: 500, .. })));
    }
}
