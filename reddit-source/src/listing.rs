//! Wire types for Reddit listing responses.
//!
//! Only the fields used to build [`ContentItem`]s are decoded; everything
//! else in the envelope is ignored.

use serde::Deserialize;

use crate::types::ContentItem;

/// Top-level listing envelope (`{"kind": "Listing", "data": {...}}`).
#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

/// Page contents and the cursor to the next page.
#[derive(Debug, Deserialize)]
pub struct ListingData<T> {
    /// Fullname of the last item, `None` on the final page
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default = "Vec::new")]
    pub children: Vec<Thing<T>>,
}

/// A typed child (`t1` comment, `t3` submission).
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

/// Comment fields.
#[derive(Debug, Deserialize)]
pub struct CommentData {
    #[serde(default)]
    pub body: String,
    pub permalink: String,
}

/// Submission fields.
#[derive(Debug, Deserialize)]
pub struct SubmissionData {
    #[serde(default)]
    pub title: String,
    /// Empty for link posts
    #[serde(default)]
    pub selftext: String,
    pub permalink: String,
}

/// Listing section for a user and the child kind it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Comments,
    Submitted,
}

impl Section {
    /// Path segment under `/user/<name>/`.
    pub fn path(&self) -> &'static str {
        match self {
            Section::Comments => "comments",
            Section::Submitted => "submitted",
        }
    }

    /// Thing kind prefix expected in this section.
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Comments => "t1",
            Section::Submitted => "t3",
        }
    }
}

impl From<CommentData> for ContentItem {
    fn from(c: CommentData) -> Self {
        ContentItem::comment(c.body, &c.permalink)
    }
}

impl From<SubmissionData> for ContentItem {
    fn from(s: SubmissionData) -> Self {
        ContentItem::post(&s.title, &s.selftext, &s.permalink)
    }
}
