//! Activity source abstraction.
//!
//! The pipeline only needs "give me this user's recent items"; the Reddit
//! client and the test mock both provide that through [`ActivitySource`].

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::error::{FetchError, Result};
use crate::types::ContentItem;

/// Something that can return a user's recent public activity.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Fetch up to `limit` comments and up to `limit` posts for `username`.
    ///
    /// `Ok(vec![])` means the user has no visible activity; failures are
    /// always reported as `Err`.
    async fn fetch_activity(&self, username: &str, limit: usize) -> Result<Vec<ContentItem>>;
}

/// Mock source for testing.
pub struct MockSource {
    items: Vec<ContentItem>,
    error: Option<Box<dyn Fn() -> FetchError + Send + Sync>>,
    call_count: AtomicU32,
    last_limit: AtomicUsize,
}

impl MockSource {
    /// Create a mock that returns the given items for any username.
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self {
            items,
            error: None,
            call_count: AtomicU32::new(0),
            last_limit: AtomicUsize::new(0),
        }
    }

    /// Create a mock with no activity.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Make every fetch fail with the error built by `make`.
    pub fn with_error(mut self, make: impl Fn() -> FetchError + Send + Sync + 'static) -> Self {
        self.error = Some(Box::new(make));
        self
    }

    /// Get the number of times fetch_activity was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Limit passed to the most recent fetch.
    pub fn last_limit(&self) -> usize {
        self.last_limit.load(Ordering::SeqCst)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl ActivitySource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_activity(&self, _username: &str, limit: usize) -> Result<Vec<ContentItem>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit, Ordering::SeqCst);

        if let Some(make) = &self.error {
            return Err(make());
        }

        Ok(self.items.clone())
    }
}
