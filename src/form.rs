use serde::Deserialize;

use crate::models::{Feed, FeedId, FeedUpdate, NewFeed};

pub const TITLE_MAX_CHARS: usize = 200;

/// Raw url-encoded body of the feed create/edit forms.
#[derive(Debug, Default, Deserialize)]
pub struct FeedFormInput {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Feed form state: submitted values plus field-level validation errors.
#[derive(Debug, Clone, Default)]
pub struct FeedForm {
    pub id: Option<FeedId>,
    pub title: String,
    pub errors: Vec<FieldError>,
}

impl FeedForm {
    /// An empty form for the create page. Not validated.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_input(input: FeedFormInput) -> Self {
        let mut form = Self {
            id: None,
            title: input.title.trim().to_string(),
            errors: Vec::new(),
        };
        form.validate();
        form
    }

    /// Pre-fills the form from a stored feed for the edit page.
    pub fn from_feed(feed: &Feed) -> Self {
        Self {
            id: Some(feed.id),
            title: feed.title.clone(),
            errors: Vec::new(),
        }
    }

    pub fn set_id(&mut self, id: FeedId) {
        self.id = Some(id);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn title_error(&self) -> Option<&str> {
        self.error_for("title")
    }

    pub fn to_new_feed(&self) -> NewFeed {
        NewFeed::new(self.title.clone())
    }

    pub fn to_update(&self, id: FeedId) -> FeedUpdate {
        FeedUpdate {
            id,
            title: self.title.clone(),
        }
    }

    fn validate(&mut self) {
        self.errors.clear();
        if self.title.is_empty() {
            self.add_error("title", "Title is required");
        } else if self.title.chars().count() > TITLE_MAX_CHARS {
            self.add_error(
                "title",
                format!("Title must be at most {} characters", TITLE_MAX_CHARS),
            );
        }
    }

    fn add_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}
