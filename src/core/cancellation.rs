//! Search generations: cooperative cancellation by comparison.
//!
//! The caller owns a `SearchGeneration`. Every new search calls `begin()`,
//! which bumps the counter and hands back a `SearchToken`. Work in flight holds
//! its token and asks `is_current()` at its check points; nothing is aborted
//! forcibly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SearchGeneration {
    latest: Arc<AtomicU64>,
}

impl SearchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, superseding every outstanding token.
    pub fn begin(&self) -> SearchToken {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        SearchToken {
            id,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Invalidates outstanding tokens without starting a search.
    pub fn supersede(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Identifies one search. Cheap to clone; clones share validity.
#[derive(Debug, Clone)]
pub struct SearchToken {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl SearchToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}
