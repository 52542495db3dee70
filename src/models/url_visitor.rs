use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Visits from one visitor cookie to one short URL.
///
/// `count` always equals `timestamps.len()`; both only change through
/// [`VisitorLedger::tick_at`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VisitorRecord {
    count: u64,
    timestamps: Vec<i64>, // Milliseconds since epoch, oldest first
}

impl VisitorRecord {
    fn first(at: i64) -> Self {
        Self {
            count: 1,
            timestamps: vec![at],
        }
    }

    fn record(&mut self, at: i64) {
        self.count += 1;
        self.timestamps.push(at);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }
}

/// Per-link visitor history keyed by visitor identifier.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorLedger {
    visitors: BTreeMap<String, VisitorRecord>,
}

impl VisitorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, visitor_id: &str) {
        self.tick_at(visitor_id, chrono::Utc::now().timestamp_millis());
    }

    pub fn tick_at(&mut self, visitor_id: &str, at: i64) {
        match self.visitors.get_mut(visitor_id) {
            Some(record) => record.record(at),
            None => {
                self.visitors
                    .insert(visitor_id.to_string(), VisitorRecord::first(at));
            }
        }
    }

    /// Number of distinct visitor identifiers.
    pub fn unique_count(&self) -> usize {
        self.visitors.len()
    }

    /// Total redirects across all visitors.
    pub fn total_visits(&self) -> u64 {
        self.visitors.values().map(VisitorRecord::count).sum()
    }

    pub fn history(&self) -> BTreeMap<String, Vec<i64>> {
        self.visitors
            .iter()
            .map(|(id, record)| (id.clone(), record.timestamps.clone()))
            .collect()
    }

    pub fn record(&self, visitor_id: &str) -> Option<&VisitorRecord> {
        self.visitors.get(visitor_id)
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_creates_record() {
        let mut ledger = VisitorLedger::new();
        ledger.tick_at("v1", 100);

        let record = ledger.record("v1").unwrap();
        assert_eq!(record.count(), 1);
        assert_eq!(record.timestamps(), &[100]);
        assert_eq!(ledger.unique_count(), 1);
    }

    #[test]
    fn test_repeat_visitor_counted_once() {
        let mut ledger = VisitorLedger::new();
        for at in 0..5 {
            ledger.tick_at("v1", at);
        }
        ledger.tick_at("v2", 10);

        assert_eq!(ledger.unique_count(), 2);
        assert_eq!(ledger.total_visits(), 6);

        let record = ledger.record("v1").unwrap();
        assert_eq!(record.count(), 5);
        assert_eq!(record.count() as usize, record.timestamps().len());
        assert_eq!(record.timestamps(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_history_lists_every_visitor() {
        let mut ledger = VisitorLedger::new();
        ledger.tick_at("b", 2);
        ledger.tick_at("a", 1);
        ledger.tick_at("b", 3);

        let history = ledger.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history["a"], vec![1]);
        assert_eq!(history["b"], vec![2, 3]);
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = VisitorLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.unique_count(), 0);
        assert_eq!(ledger.total_visits(), 0);
        assert!(ledger.history().is_empty());
    }
}
