//! Navigation targets: `path?query` parsing and formatting.
//!
//! Query values are percent-encoded only where they would otherwise break
//! the `key=value&...` framing, so a return path reads as
//! `/login?redirect=/boards` rather than `%2Fboards`.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, PercentEncode, utf8_percent_encode};
use url::form_urlencoded;

/// Query key carrying the post-login return target.
pub const REDIRECT_PARAM: &str = "redirect";

/// A parsed navigation target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    /// Parse `path?query#hash`. The hash is dropped; an empty path becomes `/`.
    #[must_use]
    pub fn parse(target: &str) -> Self {
        let target = target.split('#').next().unwrap_or_default();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let path = if path.is_empty() { "/".to_owned() } else { path.to_owned() };
        let query = query.map(parse_query).unwrap_or_default();
        Self { path, query }
    }

    #[must_use]
    pub fn with_path(path: &str) -> Self {
        Self { path: path.to_owned(), query: Vec::new() }
    }

    /// Append a query pair.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    /// First value for `key`, decoded.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Path plus encoded query, e.g. `/login?redirect=/`.
    #[must_use]
    pub fn full_path(&self) -> String {
        self.to_string()
    }

    /// Where to land after a successful login.
    ///
    /// Honors the `redirect` query value when it is an absolute same-origin
    /// path; anything else (missing, relative, `//host`, `scheme:`) yields `/`.
    #[must_use]
    pub fn post_login_target(&self) -> String {
        match self.query_value(REDIRECT_PARAM) {
            Some(target) if is_local_path(target) => target.to_owned(),
            _ => "/".to_owned(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{}={}", encode_component(key), encode_component(value))?;
        }
        Ok(())
    }
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}

fn parse_query(raw: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.as_bytes()).into_owned().collect()
}

/// Bytes escaped in query keys and values: everything outside the
/// unreserved set except the path punctuation a return target needs.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/')
    .remove(b':')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b';')
    .remove(b'?');

fn encode_component(raw: &str) -> PercentEncode<'_> {
    utf8_percent_encode(raw, QUERY_COMPONENT)
}
