pub mod types;

use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use types::{PlaceDetails, SearchPage, SearchRequest, SearchResponse};

const API_BASE: &str = "https://places.googleapis.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

// Field masks keep billing down by requesting only what the pipeline reads.
const SEARCH_FIELD_MASK: &str = "places.id,places.name,places.displayName,places.formattedAddress,places.googleMapsUri,places.location,places.primaryType,nextPageToken";
const DETAILS_FIELD_MASK: &str = "id,displayName,formattedAddress,internationalPhoneNumber,nationalPhoneNumber,websiteUri,rating,userRatingCount,googleMapsUri";

#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("GOOGLE_PLACES_API_KEY not set. Create one in the Google Cloud console.")]
    ApiKeyNotSet,

    #[error("Places API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Text-search capability. Implemented by `PlacesClient` for production;
/// mock implementations used in tests.
pub trait SearchProvider {
    async fn search(
        &self,
        query: &str,
        page_token: Option<&str>,
        page_size: u8,
    ) -> Result<SearchPage, PlacesError>;
}

/// Place-details capability, split from search so the enrichment side can
/// be mocked independently.
pub trait DetailProvider {
    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}

/// Pulls the plain id from a resource name like `places/ChIJ...`. Other
/// non-empty strings pass through unchanged.
pub fn extract_place_id(resource_name: Option<&str>) -> Option<String> {
    let name = resource_name?;
    if name.is_empty() {
        return None;
    }
    Some(name.strip_prefix("places/").unwrap_or(name).to_string())
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone)]
pub struct PlacesClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl PlacesClient {
    pub fn from_env(http: Client) -> Result<Self, PlacesError> {
        let api_key = env::var("GOOGLE_PLACES_API_KEY").map_err(|_| PlacesError::ApiKeyNotSet)?;
        if api_key.trim().is_empty() {
            return Err(PlacesError::ApiKeyNotSet);
        }
        Ok(Self {
            http,
            api_key: ApiKey(api_key.trim().to_string()),
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            base_url: base_url.to_string(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PlacesError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let snippet = if text.len() > 200 { &text[..200] } else { &text };
        warn!(status = %status, "Places API error");
        Err(PlacesError::Api {
            code: status.as_u16(),
            message: format!("HTTP {status}: {snippet}"),
        })
    }
}

impl SearchProvider for PlacesClient {
    async fn search(
        &self,
        query: &str,
        page_token: Option<&str>,
        page_size: u8,
    ) -> Result<SearchPage, PlacesError> {
        let url = format!("{}/places:searchText", self.base_url);
        let request = SearchRequest {
            text_query: query.to_string(),
            page_size,
            page_token: page_token.map(str::to_string),
        };

        debug_assert!(
            url.starts_with("https://") || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key.0)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body: SearchResponse = Self::check(response).await?.json().await?;
        let places = body.places.unwrap_or_default();
        debug!(query, count = places.len(), "text search page received");

        Ok(SearchPage {
            places,
            // The API has been seen returning "" for the last page.
            next_page_token: body.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}

impl DetailProvider for PlacesClient {
    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = format!("{}/places/{place_id}", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("X-Goog-Api-Key", &self.api_key.0)
            .header("X-Goog-FieldMask", DETAILS_FIELD_MASK)
            .header("User-Agent", crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let details: PlaceDetails = Self::check(response).await?.json().await?;
        debug!(place_id, "place details received");
        Ok(details)
    }
}
