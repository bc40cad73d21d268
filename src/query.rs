//! Query string parsing.
//!
//! Lookup strings are fully qualified: dotted sequences of plain names
//! with no wildcards and no loose bindings. This is a much smaller grammar
//! than the entry specifier grammar, so it gets its own parser.
//!
//! # Examples
//!
//! ```
//! use xrm::query::Query;
//!
//! let query = Query::parse("xterm.vt100.foreground")?;
//! assert_eq!(query.len(), 3);
//! assert_eq!(query.components()[1], "vt100");
//!
//! assert!(Query::parse("xterm*foreground").is_err());
//! assert!(Query::parse("xterm..foreground").is_err());
//! # Ok::<(), xrm::XrmError>(())
//! ```

use crate::error::{Result, XrmError};

/// A parsed, fully qualified query string (resource name or class).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    components: Vec<String>,
}

impl Query {
    /// Parses a dotted component string.
    ///
    /// # Errors
    ///
    /// Returns [`XrmError::MalformedSpecifier`] for empty input, empty
    /// inter-dot segments, wildcards, loose bindings or any other illegal
    /// character.
    pub fn parse(text: &str) -> Result<Query> {
        if text.is_empty() {
            return Err(XrmError::MalformedSpecifier(
                "empty query string".to_string(),
            ));
        }

        let mut components = Vec::new();
        for segment in text.split('.') {
            if segment.is_empty() {
                return Err(XrmError::MalformedSpecifier(format!(
                    "empty component in query '{}'",
                    text
                )));
            }
            if let Some(bad) = segment
                .bytes()
                .find(|&b| !(b.is_ascii_alphanumeric() || b == b'_' || b == b'-'))
            {
                return Err(XrmError::MalformedSpecifier(format!(
                    "illegal character '{}' in query '{}'",
                    bad as char, text
                )));
            }
            components.push(segment.to_string());
        }

        Ok(Query { components })
    }

    /// The query's name components, in order.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Number of components.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.components.len()
    }
}
