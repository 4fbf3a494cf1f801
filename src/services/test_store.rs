// src/services/test_store.rs

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use crate::models::test::Test;

struct Entry {
    test: Arc<Test>,
    stored_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    tests: HashMap<String, Entry>,
    /// Ids in insertion order, oldest first.
    order: VecDeque<String>,
}

/// Generated tests awaiting evaluation, keyed by test id.
///
/// Holds at most `capacity` tests (oldest evicted first) and forgets tests
/// older than `ttl`.
pub struct TestStore {
    inner: RwLock<Inner>,
    capacity: usize,
    ttl: Duration,
}

impl TestStore {
    pub fn new(capacity: usize, ttl: std::time::Duration) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            capacity: capacity.max(1),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    pub fn insert(&self, test: Test) -> Arc<Test> {
        self.insert_at(test, Utc::now())
    }

    pub fn get(&self, test_id: &str) -> Option<Arc<Test>> {
        self.get_at(test_id, Utc::now())
    }

    pub fn len(&self) -> usize {
        self.inner.read().tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_at(&self, test: Test, now: DateTime<Utc>) -> Arc<Test> {
        let test = Arc::new(test);
        let mut inner = self.inner.write();

        self.purge_expired(&mut inner, now);

        while inner.tests.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            if inner.tests.remove(&oldest).is_some() {
                tracing::warn!(test_id = %oldest, "test store full, evicting oldest test");
            }
        }

        let id = test.test_id.clone();
        if inner
            .tests
            .insert(
                id.clone(),
                Entry {
                    test: Arc::clone(&test),
                    stored_at: now,
                },
            )
            .is_some()
        {
            inner.order.retain(|existing| existing != &id);
        }
        inner.order.push_back(id);

        test
    }

    fn get_at(&self, test_id: &str, now: DateTime<Utc>) -> Option<Arc<Test>> {
        let inner = self.inner.read();
        inner
            .tests
            .get(test_id)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| Arc::clone(&entry.test))
    }

    fn is_expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.stored_at) > self.ttl
    }

    fn purge_expired(&self, inner: &mut Inner, now: DateTime<Utc>) {
        while let Some(oldest) = inner.order.front() {
            let expired = inner
                .tests
                .get(oldest)
                .is_none_or(|entry| self.is_expired(entry, now));
            if !expired {
                break;
            }
            if let Some(id) = inner.order.pop_front() {
                inner.tests.remove(&id);
                tracing::debug!(test_id = %id, "expired test dropped");
            }
        }
    }
}
