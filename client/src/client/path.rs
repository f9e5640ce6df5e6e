//! Relative request paths under the versioned API root.
//!
//! Every dynamic segment is percent-encoded so identifiers containing
//! reserved characters cannot alter the path or query string.

use std::borrow::Cow;
use std::fmt;

/// Query parameter toggling transitive (group-inherited) results.
const INCLUDE_INDIRECT_MAPPINGS: &str = "includeIndirectMappings";

/// A relative path such as `users/user%2F1`, optionally with a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestPath {
    path: String,
    query: Option<String>,
}

impl RequestPath {
    /// Start a path at a literal collection segment.
    pub(crate) fn collection(name: &str) -> Self {
        Self {
            path: name.to_owned(),
            query: None,
        }
    }

    /// Append a literal segment.
    pub(crate) fn literal(mut self, segment: &str) -> Self {
        self.path.push('/');
        self.path.push_str(segment);
        self
    }

    /// Append a percent-encoded identifier segment.
    pub(crate) fn encoded(mut self, value: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&encode_segment(value));
        self
    }

    /// Append a literal segment followed by an encoded identifier.
    pub(crate) fn keyed(self, key: &str, value: &str) -> Self {
        self.literal(key).encoded(value)
    }

    /// The path without its query string.
    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    /// Set the `includeIndirectMappings` query parameter.
    pub(crate) fn include_indirect_mappings(mut self, include: bool) -> Self {
        self.query = Some(format!("{INCLUDE_INDIRECT_MAPPINGS}={include}"));
        self
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

/// Percent-encode one path segment.
///
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through unchanged.
fn encode_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
