use std::borrow::Cow;

use crate::lead::{Lead, SOURCE};

const HEADERS: [&str; 13] = [
    "Business Name",
    "Category",
    "City",
    "Country",
    "Address",
    "Phone",
    "Website",
    "Has Website? (Y/N)",
    "Facebook URL",
    "Google Maps URL",
    "Rating",
    "Rating Count",
    "Source",
];

/// Serializes the lead set as CSV: one header row, one row per lead, in
/// the fixed column order above.
pub fn to_csv(leads: &[Lead]) -> String {
    let mut rows = Vec::with_capacity(leads.len() + 1);
    rows.push(HEADERS.join(","));
    for lead in leads {
        rows.push(lead_row(lead));
    }
    rows.join("\n")
}

fn lead_row(lead: &Lead) -> String {
    let rating = lead.rating.map(|r| r.to_string()).unwrap_or_default();
    let rating_count = lead.rating_count.map(|c| c.to_string()).unwrap_or_default();

    let fields: [&str; 13] = [
        &lead.business_name,
        &lead.category,
        &lead.city,
        &lead.country,
        &lead.address,
        lead.phone.as_deref().unwrap_or_default(),
        lead.website.as_deref().unwrap_or_default(),
        lead.has_website_flag(),
        lead.facebook_url.as_deref().unwrap_or_default(),
        lead.maps_url.as_deref().unwrap_or_default(),
        &rating,
        &rating_count,
        SOURCE,
    ];

    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quotes a field when it contains a comma, newline, backslash, or double
/// quote; embedded quotes are doubled. Clean values pass through as-is.
fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '\n', '\\', '"']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
