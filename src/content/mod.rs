//! Blog posts and the content collection they are loaded from.
//!
//! A post is immutable once loaded. The collection is always handed around as
//! a slice sorted newest first, which is the order every listing displays.

mod error;
pub mod loader;

pub use error::ContentError;
pub use loader::load_posts;

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Average reading speed used for the estimate.
const WORDS_PER_MINUTE: usize = 200;

/// A single blog article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// URL identifier, unique within the collection.
    pub slug: String,
    pub title: String,
    pub summary: String,
    /// Unique entries, in the order they were first declared.
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub reading_time: ReadingTime,
    /// Banner images; the first one is used on the post page.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Raw post body (plain text paragraphs).
    #[serde(skip)]
    pub body: String,
}

impl Post {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            summary: String::new(),
            tags: Vec::new(),
            date,
            reading_time: ReadingTime::default(),
            images: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set tags, dropping repeats while keeping first-seen order.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = dedup_tags(tags.into_iter().map(Into::into));
        self
    }

    /// Set the body and derive the reading time from it.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self.reading_time = ReadingTime::estimate(&self.body);
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Site-relative path of the post page, e.g. `blog/aws-basics`.
    pub fn path(&self, listing_base: &str) -> String {
        format!("{listing_base}/{}", self.slug)
    }

    /// Text the search box matches against.
    pub fn search_content(&self) -> String {
        format!("{}{}{}", self.title, self.summary, self.tags.join(" "))
    }
}

/// Remove duplicate tags, keeping the first occurrence of each.
fn dedup_tags(tags: impl Iterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_owned();
        if !tag.is_empty() && !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

/// Newest first; same-day posts ordered by title.
pub fn compare_posts(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title))
}

/// Estimated reading time of a post body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: usize,
}

impl ReadingTime {
    /// Whitespace-separated words at 200 wpm, rounded up, at least a minute.
    pub fn estimate(body: &str) -> Self {
        let words = body.split_whitespace().count();
        let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
        Self { words, minutes }
    }

    /// Display text, e.g. `3 min read`.
    pub fn text(&self) -> String {
        format!("{} min read", self.minutes)
    }
}
