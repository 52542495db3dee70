use serde::{Deserialize, Serialize};

use crate::models::url_visitor::VisitorLedger;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShortenedUrl {
    pub short_code: String,
    pub original_url: String,
    pub owner_id: String, // Account that created the link
    pub created_at: i64,
    #[serde(default)]
    pub visitors: VisitorLedger,
}

impl ShortenedUrl {
    pub fn new(short_code: String, original_url: String, owner_id: String) -> Self {
        Self {
            short_code,
            original_url,
            owner_id,
            created_at: chrono::Utc::now().timestamp_millis(),
            visitors: VisitorLedger::new(),
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}
