//! Profile URL parsing.

use url::{ParseError, Url};

use crate::types::REDDIT_ORIGIN;

/// Extract the username from a Reddit profile URL.
///
/// Accepts paths shaped `/user/<name>[/...]` ("user" is case-insensitive).
/// Anything else, including malformed input, yields `None`. Scheme-less
/// input is resolved against the Reddit origin first.
pub fn extract_username(input: &str) -> Option<String> {
    let url = parse_lenient(input.trim())?;

    let path = url.path().trim_matches('/');
    let mut segments = path.split('/');

    let first = segments.next()?;
    let name = segments.next()?;

    if first.eq_ignore_ascii_case("user") && !name.is_empty() {
        Some(name.to_string())
    } else {
        None
    }
}

fn parse_lenient(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(REDDIT_ORIGIN).ok()?;
            base.join(input).ok()
        }
        Err(_) => None,
    }
}
