//! Resource entry parsing.
//!
//! This module parses single logical lines of an X resource file into
//! structured entries. An entry is a resource specifier (components joined
//! by tight or loose bindings) followed by a value:
//!
//! ```text
//! entry     := ws? binding component (binding component)* ws? ':' ws? value
//! binding   := '.' | '*'
//! component := name | '?'
//! name      := [A-Za-z0-9_-]+
//! value     := characters up to end-of-line, with escapes
//! ```
//!
//! The leading binding defaults to tight when a line begins directly with
//! a component. Runs of consecutive binding characters collapse into one
//! binding, loose if any `*` appears in the run. Comment lines (`!`),
//! blank lines and `#include "..."` directives are classified by
//! [`ResourceLine::parse`] rather than producing entries.
//!
//! # Examples
//!
//! ```
//! use xrm::entry::{Binding, Entry};
//!
//! let entry = Entry::parse("xterm*foreground: white")?;
//! assert_eq!(entry.components().len(), 2);
//! assert_eq!(entry.components()[1].binding, Binding::Loose);
//! assert_eq!(entry.value(), "white");
//! # Ok::<(), xrm::XrmError>(())
//! ```

use crate::error::{Result, XrmError};
use crate::escape;
use std::fmt;

/// The separator preceding a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// `.` - the component names the immediately following hierarchy level
    Tight,
    /// `*` - zero or more levels may lie in between
    Loose,
}

/// The kind of a single specifier component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// A literal name matching `[A-Za-z0-9_-]+`
    Normal(String),
    /// `?` - stands for exactly one component of any name
    Wildcard,
}

/// One element of a resource specifier: a binding paired with a name or
/// wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    /// Binding connecting this component to the preceding one. For the
    /// first component this is the leading binding of the entry.
    pub binding: Binding,
    /// Name or wildcard.
    pub kind: ComponentKind,
}

impl Component {
    fn normal(binding: Binding, name: String) -> Self {
        Component {
            binding,
            kind: ComponentKind::Normal(name),
        }
    }

    fn wildcard(binding: Binding) -> Self {
        Component {
            binding,
            kind: ComponentKind::Wildcard,
        }
    }
}

/// A single database entry: a resource specifier and its value.
///
/// The value is stored in decoded (in-memory) form; escape sequences are
/// applied on parse and re-applied on serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    components: Vec<Component>,
    value: String,
}

/// One classified logical line of a resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLine {
    /// A database entry.
    Entry(Entry),
    /// An `#include "..."` directive; the payload is the quoted path.
    /// Resolution is up to the caller - the parser only reports it.
    Include(String),
    /// A comment or blank line.
    Empty,
}

impl ResourceLine {
    /// Classifies and parses one logical line.
    ///
    /// Comment lines (first non-whitespace character `!`) and blank lines
    /// are [`ResourceLine::Empty`]; `#` lines must be well-formed include
    /// directives; anything else must parse as an entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use xrm::entry::ResourceLine;
    ///
    /// assert_eq!(ResourceLine::parse("! a comment")?, ResourceLine::Empty);
    /// assert_eq!(
    ///     ResourceLine::parse("#include \"colors.ad\"")?,
    ///     ResourceLine::Include("colors.ad".to_string())
    /// );
    /// assert!(matches!(ResourceLine::parse("Xft.dpi: 96")?, ResourceLine::Entry(_)));
    /// # Ok::<(), xrm::XrmError>(())
    /// ```
    pub fn parse(line: &str) -> Result<ResourceLine> {
        let trimmed = line.trim_start_matches([' ', '\t']);

        if trimmed.is_empty() {
            return Ok(ResourceLine::Empty);
        }

        match trimmed.as_bytes()[0] {
            b'!' => Ok(ResourceLine::Empty),
            b'#' => parse_include(trimmed).map(ResourceLine::Include),
            _ => Entry::parse(trimmed).map(ResourceLine::Entry),
        }
    }
}

/// Parses an `#include "path"` directive. `line` starts with `#`.
fn parse_include(line: &str) -> Result<String> {
    let rest = line[1..].trim_start_matches([' ', '\t']);

    let rest = rest.strip_prefix("include").ok_or_else(|| {
        XrmError::MalformedSpecifier(format!("unknown directive in line '{}'", line))
    })?;

    let rest = rest.trim_matches([' ', '\t']);
    let rest = rest.strip_prefix('"').ok_or_else(|| {
        XrmError::MalformedSpecifier(format!("missing quoted path in '{}'", line))
    })?;

    match rest.find('"') {
        Some(end) => Ok(rest[..end].to_string()),
        None => Err(XrmError::MalformedSpecifier(format!(
            "unterminated include path in '{}'",
            line
        ))),
    }
}

impl Entry {
    /// Parses a full resource line into an entry.
    ///
    /// Comment, include and blank lines are not entries; use
    /// [`ResourceLine::parse`] to classify arbitrary lines.
    ///
    /// # Errors
    ///
    /// Returns [`XrmError::MalformedSpecifier`] when the specifier is
    /// empty, contains illegal characters, ends in a dangling binding, or
    /// the `:` separator is missing.
    pub fn parse(line: &str) -> Result<Entry> {
        let bytes = line.as_bytes();
        let mut components: Vec<Component> = Vec::new();

        let mut name = String::new();
        // Binding for the component currently being scanned. Defaults to
        // tight so that a line starting with a name character gets the
        // implicit leading tight binding.
        let mut next_binding = Binding::Tight;
        // A separator run has been consumed and still owes a component.
        let mut binding_pending = false;
        // Whitespace was seen after specifier content; only more
        // whitespace or ':' may follow.
        let mut after_ws = false;

        let mut i = 0;
        while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
            i += 1;
        }

        while i < bytes.len() {
            let b = bytes[i];
            match b {
                b':' => {
                    if !name.is_empty() {
                        components.push(Component::normal(next_binding, std::mem::take(&mut name)));
                        binding_pending = false;
                    }
                    if binding_pending {
                        return Err(XrmError::MalformedSpecifier(format!(
                            "dangling binding before ':' in '{}'",
                            line
                        )));
                    }
                    if components.is_empty() {
                        return Err(XrmError::MalformedSpecifier(format!(
                            "no components before ':' in '{}'",
                            line
                        )));
                    }

                    let mut j = i + 1;
                    while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
                        j += 1;
                    }

                    return Ok(Entry {
                        components,
                        value: escape::decode(&line[j..]),
                    });
                }

                b'.' | b'*' => {
                    if after_ws {
                        return Err(XrmError::MalformedSpecifier(format!(
                            "whitespace inside specifier in '{}'",
                            line
                        )));
                    }
                    if !name.is_empty() {
                        components.push(Component::normal(next_binding, std::mem::take(&mut name)));
                        binding_pending = false;
                    }
                    if binding_pending {
                        // Collapse the separator run; loose wins.
                        if b == b'*' {
                            next_binding = Binding::Loose;
                        }
                    } else {
                        next_binding = if b == b'*' {
                            Binding::Loose
                        } else {
                            Binding::Tight
                        };
                        binding_pending = true;
                    }
                    i += 1;
                }

                b'?' => {
                    if after_ws || !name.is_empty() {
                        // '?' must stand alone as a whole component.
                        return Err(XrmError::MalformedSpecifier(format!(
                            "misplaced wildcard in '{}'",
                            line
                        )));
                    }
                    if !binding_pending && !components.is_empty() {
                        return Err(XrmError::MalformedSpecifier(format!(
                            "missing binding before wildcard in '{}'",
                            line
                        )));
                    }
                    components.push(Component::wildcard(next_binding));
                    binding_pending = false;
                    next_binding = Binding::Tight;
                    i += 1;
                }

                b' ' | b'\t' => {
                    if !name.is_empty() {
                        components.push(Component::normal(next_binding, std::mem::take(&mut name)));
                        binding_pending = false;
                    }
                    after_ws = true;
                    i += 1;
                }

                c if is_component_char(c) => {
                    if after_ws {
                        return Err(XrmError::MalformedSpecifier(format!(
                            "whitespace inside specifier in '{}'",
                            line
                        )));
                    }
                    if name.is_empty() && !binding_pending && !components.is_empty() {
                        return Err(XrmError::MalformedSpecifier(format!(
                            "missing binding between components in '{}'",
                            line
                        )));
                    }
                    name.push(c as char);
                    i += 1;
                }

                c => {
                    return Err(XrmError::MalformedSpecifier(format!(
                        "illegal character '{}' in '{}'",
                        c as char, line
                    )));
                }
            }
        }

        Err(XrmError::MalformedSpecifier(format!(
            "missing ':' separator in '{}'",
            line
        )))
    }

    /// The components of the resource specifier.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The entry's value in decoded form.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    pub(crate) fn into_value(self) -> String {
        self.value
    }

    /// Whether two entries have the structurally identical specifier
    /// (same bindings and components, byte-for-byte component equality).
    pub fn same_specifier(&self, other: &Entry) -> bool {
        self.components == other.components
    }
}

/// Serializes the entry as one resource line (no trailing newline).
///
/// The leading binding is written only when it is loose; the value is
/// re-escaped so the line parses back to an identical entry.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, component) in self.components.iter().enumerate() {
            match component.binding {
                Binding::Loose => f.write_str("*")?,
                Binding::Tight => {
                    if idx > 0 {
                        f.write_str(".")?;
                    }
                }
            }
            match &component.kind {
                ComponentKind::Normal(name) => f.write_str(name)?,
                ComponentKind::Wildcard => f.write_str("?")?,
            }
        }
        write!(f, ": {}", escape::encode(&self.value))
    }
}

fn is_component_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}
