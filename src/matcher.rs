//! Best-match selection over a resource database.
//!
//! Given a fully qualified query (name components plus optional class
//! components of the same length), every database entry is aligned against
//! the query position by position. Entries that align get a per-position
//! match record; records are then compared under the classical precedence
//! rules and the winning entry is returned.
//!
//! The precedence comparison is deliberately asymmetric: the incumbent
//! best match is kept unless the candidate wins at the first decisive
//! position, so on a full tie the first matching entry in database order
//! wins. This matches the reference behavior that existing resource files
//! rely on.

use crate::database::Database;
use crate::entry::{Binding, ComponentKind, Entry};
use crate::query::Query;

/// Per-position record of how an entry matched one query component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MatchFlags(u8);

impl MatchFlags {
    /// The entry component equaled the query name at this position.
    const NAME: u8 = 1 << 0;
    /// The entry component equaled the query class at this position.
    const CLASS: u8 = 1 << 1;
    /// The entry component was `?`.
    const WILDCARD: u8 = 1 << 2;
    /// The position was consumed by a loose binding with no entry
    /// component.
    const SKIPPED: u8 = 1 << 3;
    /// The position was reached across a loose binding.
    const PRECEDING_LOOSE: u8 = 1 << 4;

    fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    fn insert(&mut self, flag: u8) {
        self.0 |= flag;
    }

    fn remove(&mut self, flag: u8) {
        self.0 &= !flag;
    }
}

/// Finds the best-matching entry for a query.
///
/// `class`, when given, must have the same number of components as
/// `name`; [`Database::lookup`] checks this before calling in.
pub fn best_match<'db>(
    database: &'db Database,
    name: &Query,
    class: Option<&Query>,
) -> Option<&'db Entry> {
    let names = name.components();
    let classes = class.map(|c| c.components());

    let mut best: Option<(&Entry, Vec<MatchFlags>)> = None;

    for entry in database.iter() {
        let Some(flags) = try_match(entry, names, classes) else {
            continue;
        };

        match &best {
            // The first matching entry seeds the running best.
            None => best = Some((entry, flags)),
            Some((_, best_flags)) => {
                if is_better(best_flags, &flags) {
                    best = Some((entry, flags));
                }
            }
        }
    }

    best.map(|(entry, _)| entry)
}

/// Aligns a database entry against the query components.
///
/// Returns the per-position match record, or `None` when the entry does
/// not match (tight-binding mismatch, or either side left unconsumed).
fn try_match(
    entry: &Entry,
    names: &[String],
    classes: Option<&[String]>,
) -> Option<Vec<MatchFlags>> {
    let components = entry.components();
    let mut flags = vec![MatchFlags::default(); names.len()];

    let mut i = 0; // query position
    let mut j = 0; // entry component

    while i < names.len() && j < components.len() {
        let component = &components[j];

        if component.binding == Binding::Loose {
            flags[i].insert(MatchFlags::PRECEDING_LOOSE);
        }

        match &component.kind {
            ComponentKind::Normal(name) => {
                if *name == names[i] {
                    flags[i].insert(MatchFlags::NAME);
                    i += 1;
                    j += 1;
                } else if classes.is_some_and(|classes| *name == classes[i]) {
                    flags[i].insert(MatchFlags::CLASS);
                    i += 1;
                    j += 1;
                } else if component.binding == Binding::Tight {
                    return None;
                } else {
                    // The loose binding swallows this query level. The
                    // loose marker re-attaches to the final matching
                    // position of the run, so it is removed here.
                    flags[i].remove(MatchFlags::PRECEDING_LOOSE);
                    flags[i].insert(MatchFlags::SKIPPED);
                    i += 1;
                }
            }
            ComponentKind::Wildcard => {
                flags[i].insert(MatchFlags::WILDCARD);
                i += 1;
                j += 1;
            }
        }
    }

    if i == names.len() && j == components.len() {
        Some(flags)
    } else {
        None
    }
}

/// Whether `candidate` beats the incumbent `best`.
///
/// Scans position by position; the first decisive position wins. Only
/// candidate-favoring rules are checked, so a full tie keeps the
/// incumbent.
fn is_better(best: &[MatchFlags], candidate: &[MatchFlags]) -> bool {
    for (b, c) in best.iter().zip(candidate.iter()) {
        /* Precedence rule #1: Matching components, including '?', outweigh '*'. */
        if b.has(MatchFlags::SKIPPED)
            && (c.has(MatchFlags::NAME) || c.has(MatchFlags::CLASS) || c.has(MatchFlags::WILDCARD))
        {
            return true;
        }

        /* Precedence rule #2: Matching name outweighs both matching class and '?'.
         *                     Matching class outweighs '?'. */
        if (b.has(MatchFlags::CLASS) || b.has(MatchFlags::WILDCARD)) && c.has(MatchFlags::NAME) {
            return true;
        }

        if b.has(MatchFlags::WILDCARD) && c.has(MatchFlags::CLASS) {
            return true;
        }

        /* Precedence rule #3: A preceding exact match outweighs a preceding '*'. */
        if b.has(MatchFlags::PRECEDING_LOOSE) && !c.has(MatchFlags::PRECEDING_LOOSE) {
            return true;
        }
    }

    false
}
