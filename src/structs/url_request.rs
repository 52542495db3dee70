use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::url::ShortenedUrl;
use crate::store::{FlashMessage, LinkSummary};

#[derive(Deserialize, Serialize, Validate)]
pub struct UrlRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

#[derive(Serialize, Deserialize)]
pub struct UrlResponse {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
}

#[derive(Serialize, Deserialize)]
pub struct UrlListResponse {
    pub messages: Vec<FlashMessage>,
    pub urls: Vec<LinkSummary>,
}

#[derive(Serialize, Deserialize)]
pub struct UrlAnalyticsResponse {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: i64,
    pub unique_visitors: usize,
    pub total_visits: u64,
    pub visitors: BTreeMap<String, Vec<i64>>,
}

impl UrlAnalyticsResponse {
    pub fn new(link: ShortenedUrl, public_host: &str) -> Self {
        Self {
            short_url: format!("{}/u/{}", public_host, link.short_code),
            unique_visitors: link.visitors.unique_count(),
            total_visits: link.visitors.total_visits(),
            visitors: link.visitors.history(),
            short_code: link.short_code,
            original_url: link.original_url,
            created_at: link.created_at,
        }
    }
}

/// Machine-readable dump of one link, as served by `/api/urls.json`.
#[derive(Serialize, Deserialize)]
pub struct UrlExport {
    pub short_code: String,
    pub original_url: String,
    pub created_at: i64,
    pub unique_visitors: usize,
    pub total_visits: u64,
}

impl From<ShortenedUrl> for UrlExport {
    fn from(link: ShortenedUrl) -> Self {
        Self {
            unique_visitors: link.visitors.unique_count(),
            total_visits: link.visitors.total_visits(),
            short_code: link.short_code,
            original_url: link.original_url,
            created_at: link.created_at,
        }
    }
}
