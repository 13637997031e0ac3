//
// Copyright 2025 Tabs Data Inc.
//

//! Memoization of fetch results, keyed by the URL exactly as given by the caller.

use crate::error::FetchResult;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Storage of previously computed [`FetchResult`]s.
///
/// Concurrent fetches of the same URL may both miss and both store; the last store wins.
pub trait DatasetCache: Send + Sync {
    fn get(&self, url: &str) -> Option<FetchResult>;

    fn put(&self, url: &str, result: FetchResult);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}

/// In-process cache. Entries are never evicted or invalidated, it grows with every distinct URL.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, FetchResult>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetCache for MemoryCache {
    fn get(&self, url: &str) -> Option<FetchResult> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    fn put(&self, url: &str, result: FetchResult) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), result);
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Cache that stores nothing, every fetch goes to the network.
#[derive(Debug, Default)]
pub struct NoCache;

impl DatasetCache for NoCache {
    fn get(&self, _url: &str) -> Option<FetchResult> {
        None
    }

    fn put(&self, _url: &str, _result: FetchResult) {}

    fn len(&self) -> usize {
        0
    }

    fn clear(&self) {}
}
