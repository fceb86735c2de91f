/// Source tag written into every exported row.
pub const SOURCE: &str = "Maps";

/// One qualified business, ready for export. Built by `filter::qualify`
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Lead {
    pub business_name: String,
    pub category: String,
    pub city: String,
    pub country: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub has_website: bool,
    /// Set iff `website` is a Facebook page.
    pub facebook_url: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    pub maps_url: Option<String>,
}

impl Lead {
    pub fn has_website_flag(&self) -> &'static str {
        if self.has_website { "Y" } else { "N" }
    }
}
