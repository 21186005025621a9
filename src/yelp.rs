//! Yelp Fusion API adapter.
//!
//! One search query per command, then one detail lookup per returned
//! business. Detail failures degrade that business to its summary fields and
//! never abort the batch. Records are normalized into [`BusinessRecord`] and
//! rendered into the fixed multi-line listing format the commands display.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::YELP_SEARCH_LIMIT;

const YELP_API_BASE: &str = "https://api.yelp.com/v3";

static ZIPCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}$").expect("valid regex"));
static WEBSITE_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+🌐 .*").expect("valid regex"));

/// Exactly five ASCII digits.
pub fn is_valid_zipcode(zipcode: &str) -> bool {
    ZIPCODE_RE.is_match(zipcode)
}

/// Remove the secondary business-website lines from a rendered listing
/// (`!list` shows only the Yelp listing URL).
pub fn strip_website_lines(rendered: &str) -> String {
    WEBSITE_LINE_RE.replace_all(rendered, "").into_owned()
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Error: Please provide a valid 5-digit zipcode.")]
    InvalidZipcode,

    #[error("Error searching Yelp: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("Error searching Yelp: HTTP {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error)]
#[error("YELP_API_KEY environment variable is not set")]
pub struct MissingApiKey;

// ---- wire types -----------------------------------------------------------

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<BusinessSummary>,
}

#[derive(Deserialize)]
struct BusinessSummary {
    id: String,
    name: String,
    #[serde(default)]
    display_phone: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    review_count: u64,
    #[serde(default)]
    location: Location,
}

#[derive(Deserialize, Default)]
struct Location {
    #[serde(default)]
    display_address: Vec<String>,
}

#[derive(Deserialize)]
struct DetailResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    hours: Vec<HoursBlock>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    transactions: Vec<String>,
    #[serde(default)]
    messaging: Option<Messaging>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct HoursBlock {
    #[serde(default)]
    pub is_open_now: bool,
    #[serde(default)]
    pub open: Vec<OpenSlot>,
}

/// One open/close window. `day` uses Yelp's 0 = Monday convention, `start`
/// and `end` are HHMM strings like "1000".
#[derive(Deserialize, Debug, Clone)]
pub struct OpenSlot {
    pub day: u32,
    pub start: String,
    pub end: String,
}

#[derive(Deserialize)]
struct Category {
    title: String,
}

#[derive(Deserialize, Debug, Clone)]
struct Messaging {
    #[serde(default)]
    use_case_text: Option<String>,
    #[serde(default)]
    response_rate_description: Option<String>,
}

// ---- normalized records ---------------------------------------------------

/// Normalized view of one search result plus its detail lookup.
#[derive(Debug, Clone)]
pub struct BusinessRecord {
    /// 1-based position in the search results.
    pub rank: usize,
    pub name: String,
    pub phone: Option<String>,
    /// Ordered display-address lines, joined with ", " for display.
    pub address: Vec<String>,
    pub rating: f64,
    pub review_count: u64,
    /// Public Yelp listing URL (from the summary record).
    pub yelp_url: Option<String>,
    /// Extended fields; `None` when the detail lookup failed.
    pub detail: Option<BusinessDetail>,
}

#[derive(Debug, Clone)]
pub struct BusinessDetail {
    /// The business's own website URL.
    pub website: Option<String>,
    pub price: Option<String>,
    pub hours: Option<HoursBlock>,
    pub categories: Vec<String>,
    pub transactions: Vec<String>,
    pub messaging_use_case: Option<String>,
    pub messaging_response_rate: Option<String>,
}

impl BusinessRecord {
    /// Yelp business id, recovered from the listing URL
    /// (`https://www.yelp.com/biz/<id>?...`).
    pub fn business_id(&self) -> Option<&str> {
        let url = self.yelp_url.as_deref()?;
        let after = url.split("biz/").nth(1)?;
        let id = after.split('?').next().unwrap_or(after);
        if id.is_empty() { None } else { Some(id) }
    }

    /// Deep link to Yelp's message-compose page for this business.
    pub fn message_url(&self) -> Option<String> {
        self.business_id()
            .map(|id| format!("https://www.yelp.com/message_the_business/{id}"))
    }
}

/// A completed search: the rendered listing text and the normalized records
/// behind it.
pub struct SearchOutcome {
    pub rendered: String,
    pub records: Vec<BusinessRecord>,
}

// ---- client ---------------------------------------------------------------

pub struct YelpClient {
    http: Client,
    api_key: String,
}

impl YelpClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    /// Absence of the Yelp credential is fatal at construction time.
    pub fn from_env() -> Result<Self, MissingApiKey> {
        match std::env::var("YELP_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(MissingApiKey),
        }
    }

    /// Search businesses by term and zipcode: top results sorted by rating,
    /// each enriched with a detail lookup where possible.
    pub async fn search(&self, term: &str, zipcode: &str) -> Result<SearchOutcome, SearchError> {
        if !is_valid_zipcode(zipcode) {
            return Err(SearchError::InvalidZipcode);
        }

        let response = self
            .http
            .get(format!("{YELP_API_BASE}/businesses/search"))
            .bearer_auth(&self.api_key)
            .query(&[
                ("term", term),
                ("location", zipcode),
                ("limit", &YELP_SEARCH_LIMIT.to_string()),
                ("sort_by", "rating"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }
        let search: SearchResponse = response.json().await?;

        if search.businesses.is_empty() {
            return Ok(SearchOutcome {
                rendered: format!("No results found for '{term}' in zipcode {zipcode}."),
                records: Vec::new(),
            });
        }

        let mut records = Vec::with_capacity(search.businesses.len());
        for (i, summary) in search.businesses.into_iter().enumerate() {
            let rank = i + 1;
            // A single detail failure degrades this record only.
            let detail = match self.business_detail(&summary.id).await {
                Ok(detail) => Some(detail),
                Err(e) => {
                    tracing::warn!(business = %summary.name, error = %e, "detail lookup failed; using summary fields");
                    None
                }
            };
            records.push(BusinessRecord {
                rank,
                name: summary.name,
                phone: summary.display_phone,
                address: summary.location.display_address,
                rating: summary.rating,
                review_count: summary.review_count,
                yelp_url: summary.url,
                detail,
            });
        }

        let rendered = render_listing(term, zipcode, &records);
        Ok(SearchOutcome { rendered, records })
    }

    async fn business_detail(&self, id: &str) -> Result<BusinessDetail, SearchError> {
        let response = self
            .http
            .get(format!("{YELP_API_BASE}/businesses/{id}"))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }
        let detail: DetailResponse = response.json().await?;
        Ok(BusinessDetail {
            website: detail.url,
            price: detail.price,
            hours: detail.hours.into_iter().next(),
            categories: detail.categories.into_iter().map(|c| c.title).collect(),
            transactions: detail.transactions,
            messaging_use_case: detail.messaging.as_ref().and_then(|m| m.use_case_text.clone()),
            messaging_response_rate: detail
                .messaging
                .and_then(|m| m.response_rate_description),
        })
    }
}

// ---- rendering ------------------------------------------------------------

/// Render the whole listing: a header line followed by one block per record.
pub fn render_listing(term: &str, zipcode: &str, records: &[BusinessRecord]) -> String {
    let mut out = vec![format!("🔍 Top results for '{term}' in {zipcode}:")];
    for record in records {
        out.push(render_record(record, today_weekday()));
    }
    out.join("\n")
}

/// Render one business as its fixed multi-line block. `today` is the current
/// weekday in Yelp's 0 = Monday convention, passed in so rendering stays
/// deterministic under test.
pub fn render_record(record: &BusinessRecord, today: u32) -> String {
    let address = record.address.join(", ");

    let Some(detail) = &record.detail else {
        // Degraded: summary fields only.
        return format!(
            "\n[{rank}] {name}\n    ⭐ {rating:.1} ({reviews} reviews)\n    📍 {address}\n    🔗 {url}",
            rank = record.rank,
            name = record.name,
            rating = record.rating,
            reviews = record.review_count,
            url = record.yelp_url.as_deref().unwrap_or("N/A"),
        );
    };

    let mut lines = vec![
        format!("\n[{}] {}", record.rank, record.name),
        format!("    📞 {}", record.phone.as_deref().unwrap_or("N/A")),
        format!("    ⭐ {:.1} ({} reviews)", record.rating, record.review_count),
        format!("    📍 {address}"),
    ];

    // Price tier, open/closed, and today's hours share one status line; each
    // clause appears only when known.
    let mut status_parts: Vec<String> = Vec::new();
    if let Some(price) = &detail.price {
        status_parts.push(price.clone());
    }
    if let Some(hours) = &detail.hours {
        status_parts.push(if hours.is_open_now { "Open" } else { "Closed" }.to_string());
        if let Some(slot) = hours.open.iter().find(|slot| slot.day == today) {
            status_parts.push(format!(
                "{}-{}",
                format_clock(&slot.start),
                format_clock(&slot.end)
            ));
        }
    }
    if !status_parts.is_empty() {
        lines.push(format!("    💫 {}", status_parts.join(" • ")));
    }

    if !detail.categories.is_empty() {
        let categories: Vec<&str> = detail
            .categories
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        lines.push(format!("    🏷️ {}", categories.join(", ")));
    }

    if !detail.transactions.is_empty() {
        let transactions: Vec<String> = detail
            .transactions
            .iter()
            .take(5)
            .map(|t| title_case_token(t))
            .collect();
        lines.push(format!("    💳 {}", transactions.join(", ")));
    }

    if let Some(url) = &record.yelp_url {
        lines.push(format!("    🔗 {url}"));
    }
    if let Some(website) = &detail.website {
        lines.push(format!("    🌐 {website}"));
    }

    lines.join("\n")
}

/// "restaurant_reservation" -> "Restaurant Reservation".
fn title_case_token(token: &str) -> String {
    token
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// "1000" -> "10:00". Strings that are not HHMM come back unchanged.
fn format_clock(hhmm: &str) -> String {
    if hhmm.len() == 4 && hhmm.chars().all(|c| c.is_ascii_digit()) {
        format!("{}:{}", &hhmm[..2], &hhmm[2..])
    } else {
        hhmm.to_string()
    }
}

/// Current weekday in Yelp's 0 = Monday convention.
pub fn today_weekday() -> u32 {
    use chrono::Datelike;
    chrono::Local::now().weekday().num_days_from_monday()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_snake_case_tokens() {
        assert_eq!(title_case_token("restaurant_reservation"), "Restaurant Reservation");
        assert_eq!(title_case_token("pickup"), "Pickup");
        assert_eq!(title_case_token(""), "");
    }

    #[test]
    fn clock_formats_hhmm() {
        assert_eq!(format_clock("1000"), "10:00");
        assert_eq!(format_clock("0930"), "09:30");
        assert_eq!(format_clock("odd"), "odd");
    }
}
