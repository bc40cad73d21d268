//! Loading resource databases from files.
//!
//! The matching core never touches the filesystem; this module is the
//! loader collaborator that reads resource files and expands
//! `#include "path"` directives inline. Included entries land at the
//! position of the directive, relative paths are resolved against the
//! directory of the including file, and nesting is depth-limited so that
//! include cycles terminate with an error instead of looping.

use crate::database::{Database, LogicalLines};
use crate::entry::ResourceLine;
use crate::error::{Result, XrmError};
use std::fs;
use std::path::Path;

/// Maximum nesting of #include directives before the load is aborted.
const MAX_INCLUDE_DEPTH: usize = 100;

impl Database {
    /// Loads a database from a resource file.
    ///
    /// Per-line parse errors are skipped as in [`Database::from_string`];
    /// I/O errors (including a missing included file) and exceeding the
    /// include depth limit fail the whole load.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use xrm::Database;
    ///
    /// let db = Database::from_file("/home/fred/.Xresources")?;
    /// let dpi = db.lookup_long("Xft.dpi", None);
    /// # Ok::<(), xrm::XrmError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Database> {
        let mut database = Database::new();
        load_into(&mut database, path.as_ref(), 0)?;
        Ok(database)
    }
}

fn load_into(database: &mut Database, path: &Path, depth: usize) -> Result<()> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(XrmError::IncludeDepthExceeded(format!(
            "more than {} nested includes reaching '{}'",
            MAX_INCLUDE_DEPTH,
            path.display()
        )));
    }

    let raw = fs::read(path).map_err(|err| XrmError::Io(format!("{}: {}", path.display(), err)))?;
    let text = String::from_utf8_lossy(&raw);
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    for line in LogicalLines::new(&text) {
        match ResourceLine::parse(&line) {
            Ok(ResourceLine::Entry(entry)) => database.push(entry),
            Ok(ResourceLine::Include(include)) => {
                load_into(database, &base.join(&include), depth + 1)?;
            }
            Ok(ResourceLine::Empty) | Err(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_simple_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "app.ad", "Xft.dpi: 96\n*background: gray\n");

        let db = Database::from_file(&path).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.lookup("Xft.dpi", None).unwrap(), Some("96".to_string()));
    }

    #[test]
    fn test_include_expands_at_directive_position() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "colors.ad", "*foreground: black\n");
        let main = write_file(
            &dir,
            "main.ad",
            "before.include: 1\n#include \"colors.ad\"\nafter.include: 2\n",
        );

        let db = Database::from_file(&main).unwrap();
        let values: Vec<&str> = db.iter().map(|e| e.value()).collect();
        assert_eq!(values, ["1", "black", "2"]);
    }

    #[test]
    fn test_include_relative_to_including_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        write_file(&dir, "sub/inner.ad", "inner.value: yes\n");
        write_file(&dir, "sub/outer.ad", "#include \"inner.ad\"\n");
        let main = write_file(&dir, "main.ad", "#include \"sub/outer.ad\"\n");

        let db = Database::from_file(&main).unwrap();
        assert!(db.lookup_bool("inner.value", None));
    }

    #[test]
    fn test_missing_include_fails_load() {
        let dir = TempDir::new().unwrap();
        let main = write_file(&dir, "main.ad", "#include \"nope.ad\"\n");

        let err = Database::from_file(&main).unwrap_err();
        assert!(matches!(err, XrmError::Io(_)));
    }

    #[test]
    fn test_include_cycle_is_broken() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.ad", "#include \"b.ad\"\n");
        write_file(&dir, "b.ad", "#include \"a.ad\"\n");
        let main = dir.path().join("a.ad");

        let err = Database::from_file(&main).unwrap_err();
        assert!(matches!(err, XrmError::IncludeDepthExceeded(_)));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Database::from_file("/definitely/not/here.ad"),
            Err(XrmError::Io(_))
        ));
    }
}
