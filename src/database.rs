//! Resource database container.
//!
//! A [`Database`] is an ordered collection of entries. It is created
//! empty or parsed from a text blob (the contents of an `.Xresources`
//! file or the `RESOURCE_MANAGER` property), mutated through the
//! `put_*`/`combine` operations, queried through [`Database::lookup`],
//! and serialized back to text through `Display`.
//!
//! Insertion order is preserved across all mutations; replacing an
//! existing entry's value keeps its original position. Bulk load
//! intentionally swallows per-line parse errors so that one bad line does
//! not invalidate the rest of the file - real-world resource files depend
//! on this.
//!
//! # Examples
//!
//! ```
//! use xrm::Database;
//!
//! let mut db = Database::from_string("*background: gray\nxterm*background: black\n");
//! db.put_resource("Xft.dpi", "96");
//!
//! assert_eq!(db.lookup("Xft.dpi", None)?, Some("96".to_string()));
//! assert_eq!(
//!     db.lookup("xterm.vt100.background", Some("XTerm.VT100.Background"))?,
//!     Some("black".to_string())
//! );
//! # Ok::<(), xrm::XrmError>(())
//! ```

use crate::convert;
use crate::entry::{Entry, ResourceLine};
use crate::error::{Result, XrmError};
use crate::escape;
use crate::matcher;
use crate::query::Query;
use memchr::memchr;
use std::borrow::Cow;
use std::fmt;

/// An ordered X resource database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    entries: Vec<Entry>,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Database {
        Database {
            entries: Vec::new(),
        }
    }

    /// Parses a text blob into a database.
    ///
    /// The text is split into logical lines (trailing-backslash
    /// continuations joined, CRLF accepted) and each line is parsed.
    /// Lines that fail to parse are skipped; `#include` directives are
    /// skipped too, since a bare text blob has no base path to resolve
    /// them against - use [`Database::from_file`] for that.
    pub fn from_string(text: &str) -> Database {
        let mut database = Database::new();
        for line in LogicalLines::new(text) {
            if let Ok(ResourceLine::Entry(entry)) = ResourceLine::parse(&line) {
                database.entries.push(entry);
            }
        }
        database
    }

    /// Inserts an entry.
    ///
    /// If an entry with the structurally identical specifier exists, its
    /// value is replaced in place (the original position is kept);
    /// otherwise the entry is appended.
    pub fn put(&mut self, entry: Entry) {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.same_specifier(&entry))
        {
            Some(existing) => existing.set_value(entry.into_value()),
            None => self.entries.push(entry),
        }
    }

    /// Inserts a resource given as separate specifier and value.
    ///
    /// The value is taken literally: it is escaped, formatted into a full
    /// resource line and parsed back, so that e.g. a leading space
    /// becomes the `\ ` sequence and survives serialization. This is not
    /// the same as concatenating specifier, `:` and value by hand.
    pub fn put_resource(&mut self, specifier: &str, value: &str) {
        let line = format!("{}: {}", specifier, escape::encode(value));
        self.put_resource_line(&line);
    }

    /// Parses a complete resource line and inserts the result.
    ///
    /// Lines that do not parse into an entry (comments, includes,
    /// malformed input) are ignored.
    pub fn put_resource_line(&mut self, line: &str) {
        if let Ok(ResourceLine::Entry(entry)) = ResourceLine::parse(line) {
            self.put(entry);
        }
    }

    /// Merges another database into this one, consuming it.
    ///
    /// Source entries are processed in order. An entry whose specifier
    /// already exists in this database replaces the existing value when
    /// `replace` is true and is discarded otherwise; new specifiers are
    /// appended.
    pub fn combine(&mut self, source: Database, replace: bool) {
        for entry in source.entries {
            if replace {
                self.put(entry);
            } else if !self
                .entries
                .iter()
                .any(|existing| existing.same_specifier(&entry))
            {
                self.entries.push(entry);
            }
        }
    }

    /// Looks up the best-matching value for a fully qualified resource
    /// name and optional class.
    ///
    /// An empty class string counts as "no class given" - many callers
    /// pass one even though the protocol asks for a real class.
    ///
    /// Returns `Ok(None)` when no entry matches.
    ///
    /// # Errors
    ///
    /// [`XrmError::MalformedSpecifier`] when a query string does not
    /// parse, [`XrmError::LengthMismatch`] when name and class have a
    /// different number of components.
    pub fn lookup(&self, name: &str, class: Option<&str>) -> Result<Option<String>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let name_query = Query::parse(name)?;
        let class_query = match class {
            Some(class) if !class.is_empty() => Some(Query::parse(class)?),
            _ => None,
        };

        if let Some(class_query) = &class_query {
            if class_query.len() != name_query.len() {
                return Err(XrmError::LengthMismatch(format!(
                    "name '{}' has {} components, class has {}",
                    name,
                    name_query.len(),
                    class_query.len()
                )));
            }
        }

        Ok(matcher::best_match(self, &name_query, class_query.as_ref())
            .map(|entry| entry.value().to_string()))
    }

    /// Looks up a resource and converts the value to an integer.
    ///
    /// `None` when the resource is absent or the value does not convert.
    pub fn lookup_long(&self, name: &str, class: Option<&str>) -> Option<i64> {
        self.lookup(name, class)
            .ok()
            .flatten()
            .and_then(|value| convert::to_long(&value))
    }

    /// Looks up a resource and converts the value to a bool.
    ///
    /// `false` when the resource is absent.
    pub fn lookup_bool(&self, name: &str, class: Option<&str>) -> bool {
        self.lookup(name, class)
            .ok()
            .flatten()
            .map(|value| convert::to_bool(&value))
            .unwrap_or(false)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the database has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}

/// Serializes the database, one entry per line in insertion order.
///
/// Comments and include directives are not preserved across a
/// load/serialize cycle; the output parses back into a structurally equal
/// database.
impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Iterator over the logical lines of a resource text blob.
///
/// Physical lines are LF or CRLF terminated. A physical line whose
/// trailing backslash run has odd length continues onto the next line;
/// the backslash and newline are removed when joining (an even run is
/// escaped backslashes, not a continuation).
pub(crate) struct LogicalLines<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> LogicalLines<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        LogicalLines { text, pos: 0 }
    }
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Cow<'a, str>> {
        if self.pos >= self.text.len() {
            return None;
        }

        let mut joined: Option<String> = None;

        loop {
            let rest = &self.text.as_bytes()[self.pos..];
            let (line_end, next_pos) = match memchr(b'\n', rest) {
                Some(nl) => (self.pos + nl, self.pos + nl + 1),
                None => (self.text.len(), self.text.len()),
            };

            let mut line = &self.text[self.pos..line_end];
            if let Some(stripped) = line.strip_suffix('\r') {
                line = stripped;
            }
            self.pos = next_pos;

            if has_continuation(line) && self.pos < self.text.len() {
                let line = &line[..line.len() - 1];
                joined.get_or_insert_with(String::new).push_str(line);
                continue;
            }

            return Some(match joined {
                None => Cow::Borrowed(line),
                Some(mut buffer) => {
                    buffer.push_str(line);
                    Cow::Owned(buffer)
                }
            });
        }
    }
}

fn has_continuation(line: &str) -> bool {
    let trailing = line.bytes().rev().take_while(|&b| b == b'\\').count();
    trailing % 2 == 1
}
