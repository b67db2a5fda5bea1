/// Store-assigned feed identifier. Valid identifiers start at 1.
pub type FeedId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub id: FeedId,
    pub title: String,
    pub items: Vec<FeedItem>,
}

/// A feed that has not been stored yet. It carries no identifier; the store
/// assigns one on create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFeed {
    pub title: String,
    pub items: Vec<NewFeedItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFeedItem {
    pub title: String,
    pub content: String,
}

/// Title change for an existing feed. Items and identifier are immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUpdate {
    pub id: FeedId,
    pub title: String,
}

impl NewFeed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.items.push(NewFeedItem {
            title: title.into(),
            content: content.into(),
        });
        self
    }
}
