//! Reddit Source - profile parsing and activity retrieval
//!
//! Turns a Reddit profile URL into a username and fetches that user's
//! recent public activity as an ordered list of [`ContentItem`]s:
//! - Positional profile URL parsing (`/user/<name>/...`)
//! - OAuth2 password-grant authentication against the Reddit API
//! - Paginated `new` listings for comments and submissions
//! - Typed fetch errors so "no activity" and "could not fetch" stay distinct
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   ActivitySource (trait)     │
//! └──────────────┬───────────────┘
//!        ┌───────┴────────┐
//!        ▼                ▼
//! ┌──────────────┐ ┌─────────────┐
//! │ RedditClient │ │ MockSource  │
//! │ (auth +      │ │ (tests)     │
//! │  listings)   │ │             │
//! └──────────────┘ └─────────────┘
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod listing;
pub mod profile;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use client::RedditClient;
pub use error::{FetchError, Result};
pub use profile::extract_username;
pub use source::{ActivitySource, MockSource};
pub use types::*;
