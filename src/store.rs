use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::models::{Feed, FeedId, FeedItem, FeedUpdate, NewFeed};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("feed {0} not found")]
    NotFound(FeedId),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The single source of truth for feed existence and identifier assignment.
///
/// Every value handed out is an owned copy, so the only way to change a
/// stored feed is through [`FeedStore::update`].
#[cfg_attr(test, mockall::automock)]
pub trait FeedStore: Send + Sync {
    /// All feeds in identifier order.
    fn list(&self) -> Vec<Feed>;
    fn get(&self, id: FeedId) -> StoreResult<Feed>;
    /// Stores a new feed under the next identifier and returns it.
    fn create(&self, feed: NewFeed) -> StoreResult<Feed>;
    /// Replaces the title of an existing feed. Items are left untouched.
    fn update(&self, update: FeedUpdate) -> StoreResult<Feed>;
}

#[derive(Debug)]
struct Inner {
    feeds: BTreeMap<FeedId, Feed>,
    next_id: FeedId,
}

/// Process-memory feed store. All operations run under one lock, so
/// identifier assignment and insertion are a single step.
#[derive(Debug)]
pub struct InMemoryFeedStore {
    inner: RwLock<Inner>,
}

impl Default for InMemoryFeedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                feeds: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Builds a store pre-populated through the regular create path, so the
    /// seeds receive identifiers `1..=feeds.len()`.
    pub fn with_feeds(feeds: impl IntoIterator<Item = NewFeed>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.write();
            for feed in feeds {
                inner.insert(feed);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.read().feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every mutation is a single map operation, so a panicking holder cannot
    // leave the data half-written and the poisoned guard is still usable.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn insert(&mut self, new_feed: NewFeed) -> Feed {
        let id = self.next_id;
        self.next_id += 1;

        let items = new_feed
            .items
            .into_iter()
            .zip(1..)
            .map(|(item, item_id)| FeedItem {
                id: item_id,
                title: item.title,
                content: item.content,
            })
            .collect();

        let feed = Feed {
            id,
            title: new_feed.title,
            items,
        };
        self.feeds.insert(id, feed.clone());
        feed
    }
}

impl FeedStore for InMemoryFeedStore {
    fn list(&self) -> Vec<Feed> {
        self.read().feeds.values().cloned().collect()
    }

    fn get(&self, id: FeedId) -> StoreResult<Feed> {
        self.read()
            .feeds
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, feed: NewFeed) -> StoreResult<Feed> {
        let feed = self.write().insert(feed);
        debug!(feed_id = feed.id, "Stored new feed");
        Ok(feed)
    }

    fn update(&self, update: FeedUpdate) -> StoreResult<Feed> {
        let mut inner = self.write();
        let feed = inner
            .feeds
            .get_mut(&update.id)
            .ok_or(StoreError::NotFound(update.id))?;
        feed.title = update.title;
        Ok(feed.clone())
    }
}
