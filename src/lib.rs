//! xrm - X Resource Database Parsing and Matching
//!
//! xrm is a pure-Rust implementation of the X resource database (the
//! `Xrm*` family from Xlib): parse `~/.Xresources`-style text, hold an
//! ordered database of resource entries, and answer fully qualified
//! name/class queries under the classical precedence rules.
//!
//! # Quick Start
//!
//! ```rust
//! use xrm::Database;
//!
//! let mut db = Database::from_string(
//!     "*background: gray\n\
//!      xterm*background: black\n\
//!      Xft.dpi: 96\n",
//! );
//!
//! // Fully qualified name, optional class.
//! let bg = db.lookup("xterm.vt100.background", Some("XTerm.VT100.Background"))?;
//! assert_eq!(bg, Some("black".to_string()));
//!
//! // Typed convenience lookups.
//! assert_eq!(db.lookup_long("Xft.dpi", None), Some(96));
//!
//! // Mutate and serialize back to text.
//! db.put_resource("Xft.antialias", "true");
//! let text = db.to_string();
//! # Ok::<(), xrm::XrmError>(())
//! ```
//!
//! # Resource Format
//!
//! A database is a list of entries, one per line:
//!
//! ```text
//! ! comment
//! Xft.dpi: 96
//! xterm*foreground: white
//! Foo.?.baz: 7
//! #include "colors.ad"
//! ```
//!
//! Components are joined by tight (`.`) or loose (`*`) bindings; `?`
//! stands for exactly one component of any name. A query supplies the
//! full name (and usually the parallel class) of one resource; the
//! best-matching entry wins:
//!
//! ```text
//! query      xterm.vt100.background / XTerm.VT100.Background
//!               |      |       |
//! entry      xterm  *  background      (loose binding skips vt100)
//! ```
//!
//! Matching precedence, per position: a matched component beats a
//! skipped one; name beats class beats `?`; a tight path beats a loose
//! one. Ties keep the earliest entry.
//!
//! # Scope
//!
//! The library is synchronous and the matching core does no I/O. Text
//! blobs (e.g. the `RESOURCE_MANAGER` property an X client fetched) enter
//! through [`Database::from_string`]; resource files with `#include`
//! resolution load through [`Database::from_file`].

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
/// Value conversion helpers (integer / bool readings)
pub mod convert;
/// Resource database container and operations
pub mod database;
/// Resource entry parsing
pub mod entry;
/// Error types
pub mod error;
/// Escape codec for serialized values
pub mod escape;
mod file;
/// Best-match selection
pub mod matcher;
/// Query string parsing
pub mod query;

// Re-exports for the common path

/// Ordered resource database
pub use crate::database::Database;

/// A single specifier/value entry
pub use crate::entry::Entry;

pub use crate::error::{Result, XrmError};
pub use crate::query::Query;

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
