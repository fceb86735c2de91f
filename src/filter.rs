use tracing::debug;

use crate::lead::Lead;
use crate::places::types::{Place, PlaceDetails};

/// True when the URL's host contains `facebook.com`, covering the desktop,
/// `www.` and `m.` variants. Unparseable URLs are not Facebook.
pub fn is_facebook_hosted(website: &str) -> bool {
    let Ok(parsed) = url::Url::parse(website) else {
        return false;
    };
    parsed
        .host_str()
        .is_some_and(|host| host.to_ascii_lowercase().contains("facebook.com"))
}

/// Strips newlines and collapses whitespace runs to single spaces.
pub fn sanitize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decides whether an enriched candidate is a qualified lead and builds the
/// export record if so. A business qualifies when it has no website at all,
/// or when its only web presence is a Facebook page — unless the caller
/// opted to keep businesses with a proper website too.
pub fn qualify(
    category: &str,
    place: &Place,
    details: &PlaceDetails,
    include_with_website: bool,
    city: &str,
    country: &str,
) -> Option<Lead> {
    let website = details.website_uri.clone().filter(|w| !w.is_empty());
    let facebook_url = website.clone().filter(|w| is_facebook_hosted(w));

    if !include_with_website && website.is_some() && facebook_url.is_none() {
        debug!(place = ?details.id, "has a proper website, rejected");
        return None;
    }

    let name = details
        .display_name
        .as_ref()
        .or(place.display_name.as_ref())
        .map(|d| d.text.as_str())
        .unwrap_or_default();
    let address = details
        .formatted_address
        .as_deref()
        .or(place.formatted_address.as_deref())
        .unwrap_or_default();

    Some(Lead {
        business_name: sanitize(name),
        category: category.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        address: sanitize(address),
        phone: details
            .international_phone_number
            .clone()
            .or_else(|| details.national_phone_number.clone()),
        has_website: website.is_some(),
        facebook_url,
        website,
        rating: details.rating,
        rating_count: details.user_rating_count,
        maps_url: details
            .google_maps_uri
            .clone()
            .or_else(|| place.google_maps_uri.clone()),
    })
}
