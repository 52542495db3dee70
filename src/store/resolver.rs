use crate::errors::{Result, ShortenerError};
use crate::store::link_store::LinkStore;

/// Public redirection, independent of who owns the link.
impl LinkStore {
    pub fn resolve(&self, short_code: &str) -> Result<String> {
        self.links
            .get(short_code)
            .map(|link| link.original_url.clone())
            .ok_or(ShortenerError::NotFound)
    }

    /// Record one traversal of `short_code` by `visitor_id`.
    pub fn tick(&self, short_code: &str, visitor_id: &str) -> Result<()> {
        let mut link = self
            .links
            .get_mut(short_code)
            .ok_or(ShortenerError::NotFound)?;
        link.visitors.tick(visitor_id);
        log::debug!("Visitor {} ticked {}", visitor_id, short_code);
        Ok(())
    }

    /// Resolve and tick under one entry lock, so a concurrent delete either
    /// happens entirely before or entirely after the visit.
    pub fn visit(&self, short_code: &str, visitor_id: &str) -> Result<String> {
        let mut link = self
            .links
            .get_mut(short_code)
            .ok_or(ShortenerError::NotFound)?;
        link.visitors.tick(visitor_id);
        log::debug!("Visitor {} ticked {}", visitor_id, short_code);
        Ok(link.original_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_resolve_round_trip() {
        let store = LinkStore::new();
        let code = store.add("alice", "https://example.com").unwrap();
        assert_eq!(store.resolve(&code).unwrap(), "https://example.com");
    }

    #[test]
    fn test_resolve_ignores_owner() {
        let store = LinkStore::new();
        let alice = store.add("alice", "https://alice.example").unwrap();
        let bob = store.add("bob", "https://bob.example").unwrap();

        assert_eq!(store.resolve(&alice).unwrap(), "https://alice.example");
        assert_eq!(store.resolve(&bob).unwrap(), "https://bob.example");
    }

    #[test]
    fn test_resolve_unknown_code() {
        let store = LinkStore::new();
        assert!(matches!(
            store.resolve("nope00"),
            Err(ShortenerError::NotFound)
        ));
        assert!(matches!(
            store.tick("nope00", "v1"),
            Err(ShortenerError::NotFound)
        ));
        assert!(matches!(
            store.visit("nope00", "v1"),
            Err(ShortenerError::NotFound)
        ));
    }

    #[test]
    fn test_resolve_after_delete() {
        let store = LinkStore::new();
        let code = store.add("alice", "https://example.com").unwrap();
        store.delete("alice", &code);
        assert!(matches!(store.resolve(&code), Err(ShortenerError::NotFound)));
    }

    #[test]
    fn test_n_ticks_from_one_visitor() {
        let store = LinkStore::new();
        let code = store.add("alice", "https://example.com").unwrap();
        for _ in 0..7 {
            store.tick(&code, "v1").unwrap();
        }

        let link = store.get("alice", &code).unwrap();
        assert_eq!(link.visitors.unique_count(), 1);
        assert_eq!(link.visitors.record("v1").unwrap().count(), 7);
    }

    #[test]
    fn test_visit_returns_destination_and_ticks() {
        let store = LinkStore::new();
        let code = store.add("alice", "https://example.com").unwrap();

        assert_eq!(store.visit(&code, "v1").unwrap(), "https://example.com");
        assert_eq!(store.visit(&code, "v2").unwrap(), "https://example.com");

        let summary = &store.list_for_owner("alice")[0];
        assert_eq!(summary.unique_visitors, 2);
        assert_eq!(summary.total_visits, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_visits_are_not_lost() {
        let store = Arc::new(LinkStore::new());
        let code = store.add("alice", "https://example.com").unwrap();

        let mut handles = Vec::new();
        for task in 0..8 {
            let store = store.clone();
            let code = code.clone();
            handles.push(tokio::spawn(async move {
                let visitor = format!("visitor-{}", task % 2);
                for _ in 0..250 {
                    store.visit(&code, &visitor).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let link = store.get("alice", &code).unwrap();
        assert_eq!(link.visitors.unique_count(), 2);
        assert_eq!(link.visitors.total_visits(), 2000);
        for visitor in ["visitor-0", "visitor-1"] {
            let record = link.visitors.record(visitor).unwrap();
            assert_eq!(record.count(), 1000);
            assert_eq!(record.timestamps().len(), 1000);
        }
    }
}
