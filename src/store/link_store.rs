//! Owner-scoped short URL storage.
//!
//! Links live in one map keyed by short code, so codes are unique across all
//! owners. A second map keeps each owner's codes in insertion order for
//! listing. Every mutation of a single link happens under that entry's shard
//! lock; reads hand back cloned snapshots.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShortenerError};
use crate::models::url::ShortenedUrl;
use crate::utils::short_code::{SHORT_CODE_LENGTH, generate_short_code};
use crate::utils::url_validator::validate_destination;

// Collisions at a given length before the code grows by one character
const ATTEMPTS_PER_LENGTH: usize = 8;

/// One row of an owner's link listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkSummary {
    pub short_code: String,
    pub original_url: String,
    pub created_at: i64,
    pub unique_visitors: usize,
    pub total_visits: u64,
}

impl From<&ShortenedUrl> for LinkSummary {
    fn from(link: &ShortenedUrl) -> Self {
        Self {
            short_code: link.short_code.clone(),
            original_url: link.original_url.clone(),
            created_at: link.created_at,
            unique_visitors: link.visitors.unique_count(),
            total_visits: link.visitors.total_visits(),
        }
    }
}

#[derive(Debug, Default)]
pub struct LinkStore {
    pub(super) links: DashMap<String, ShortenedUrl>,
    owners: DashMap<String, Vec<String>>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `destination`, store it under `owner` and return the new code.
    pub fn add(&self, owner: &str, destination: &str) -> Result<String> {
        validate_destination(destination)?;

        let short_code = self.insert_unique(owner, destination.trim());
        self.owners
            .entry(owner.to_string())
            .or_default()
            .push(short_code.clone());

        log::info!("Created short URL {} for owner {}", short_code, owner);
        Ok(short_code)
    }

    fn insert_unique(&self, owner: &str, destination: &str) -> String {
        let mut attempt = 0;
        loop {
            let length = SHORT_CODE_LENGTH + attempt / ATTEMPTS_PER_LENGTH;
            let candidate = generate_short_code(length);

            match self.links.entry(candidate.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(ShortenedUrl::new(
                        candidate.clone(),
                        destination.to_string(),
                        owner.to_string(),
                    ));
                    return candidate;
                }
                Entry::Occupied(_) => {
                    log::debug!("Short code collision on {}, retrying", candidate);
                    attempt += 1;
                }
            }
        }
    }

    pub fn get(&self, owner: &str, short_code: &str) -> Result<ShortenedUrl> {
        self.links
            .get(short_code)
            .filter(|link| link.is_owned_by(owner))
            .map(|link| link.value().clone())
            .ok_or(ShortenerError::NotFound)
    }

    /// Point an existing link at a new destination, keeping its history.
    /// Returns the updated link as seen under the entry lock.
    pub fn replace(
        &self,
        owner: &str,
        short_code: &str,
        destination: &str,
    ) -> Result<ShortenedUrl> {
        validate_destination(destination)?;

        let mut link = self
            .links
            .get_mut(short_code)
            .filter(|link| link.is_owned_by(owner))
            .ok_or(ShortenerError::NotFound)?;
        link.original_url = destination.trim().to_string();

        log::info!("Updated short URL {} for owner {}", short_code, owner);
        Ok(link.value().clone())
    }

    /// Remove a link and its visitor history. Absent links are a no-op.
    pub fn delete(&self, owner: &str, short_code: &str) {
        let removed = self
            .links
            .remove_if(short_code, |_, link| link.is_owned_by(owner))
            .is_some();

        if removed {
            if let Some(mut codes) = self.owners.get_mut(owner) {
                codes.retain(|code| code != short_code);
            }
            log::info!("Deleted short URL {} for owner {}", short_code, owner);
        }
    }

    pub fn list_for_owner(&self, owner: &str) -> Vec<LinkSummary> {
        let codes = match self.owners.get(owner) {
            Some(codes) => codes.value().clone(),
            None => return Vec::new(),
        };

        codes
            .iter()
            .filter_map(|code| self.links.get(code).map(|link| LinkSummary::from(link.value())))
            .collect()
    }

    /// Full snapshots of an owner's links, in insertion order.
    pub fn export_for_owner(&self, owner: &str) -> Vec<ShortenedUrl> {
        let codes = match self.owners.get(owner) {
            Some(codes) => codes.value().clone(),
            None => return Vec::new(),
        };

        codes
            .iter()
            .filter_map(|code| self.links.get(code).map(|link| link.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
