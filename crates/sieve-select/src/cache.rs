//! Parsed-selector memoization.
//!
//! The engine asks its cache before parsing and stores every list it
//! parses. Entries are keyed by the raw selector text and never expire; a
//! cache holds only ASTs, which do not depend on the tree, so reusing one
//! across tree mutations is safe.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use crate::selector::SelectorList;

/// Storage for parsed selector lists, keyed by selector text.
pub trait SelectorCache {
    /// Previously stored list for `key`.
    fn get(&self, key: &str) -> Option<Rc<SelectorList>>;

    /// Store `list` under `key`, replacing any previous entry.
    fn put(&self, key: &str, list: Rc<SelectorList>);
}

impl<C: SelectorCache + ?Sized> SelectorCache for &C {
    fn get(&self, key: &str) -> Option<Rc<SelectorList>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, list: Rc<SelectorList>) {
        (**self).put(key, list);
    }
}

/// A cache that stores nothing; every lookup parses afresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl SelectorCache for NoCache {
    fn get(&self, _key: &str) -> Option<Rc<SelectorList>> {
        None
    }

    fn put(&self, _key: &str, _list: Rc<SelectorList>) {}
}

/// Counters reported by [`MemoryCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Stored entries.
    pub entries: usize,
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
}

/// Unbounded in-memory cache for a single thread.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, Rc<SelectorList>>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl MemoryCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry count and hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.hits.set(0);
        self.misses.set(0);
    }
}

impl SelectorCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Rc<SelectorList>> {
        let found = self.entries.borrow().get(key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.set(counter.get() + 1);
        found
    }

    fn put(&self, key: &str, list: Rc<SelectorList>) {
        let _ = self.entries.borrow_mut().insert(key.to_string(), list);
    }
}
