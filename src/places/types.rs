use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub text_query: String,
    pub page_size: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub places: Option<Vec<Place>>,
    pub next_page_token: Option<String>,
}

/// A candidate from text search, before detail enrichment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Option<String>,
    /// Resource name in the form `places/{id}`.
    pub name: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub google_maps_uri: Option<String>,
    pub location: Option<LatLng>,
    pub primary_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub international_phone_number: Option<String>,
    pub national_phone_number: Option<String>,
    pub website_uri: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u64>,
    pub google_maps_uri: Option<String>,
}

/// One page of search results, with the token for the next one if any.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub places: Vec<Place>,
    pub next_page_token: Option<String>,
}
