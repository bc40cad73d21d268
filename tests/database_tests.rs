//! Integration tests for database construction and serialization
//!
//! End-to-end coverage of loading from text, mutation through the put
//! operations, combining databases, and the text round trip.

use xrm::entry::{Entry, ResourceLine};
use xrm::{Database, Query};

#[test]
fn test_load_preserves_order_and_duplicates() {
    let db = Database::from_string("b: 2\na: 1\nb: 3\n");
    let values: Vec<&str> = db.iter().map(|e| e.value()).collect();
    assert_eq!(values, ["2", "1", "3"], "load must not reorder or dedup");
}

#[test]
fn test_load_skips_comments_includes_and_garbage() {
    let db = Database::from_string(
        "! this is a comment\n\
         \n\
         #include \"other.ad\"\n\
         broken line without separator\n\
         a.b: ok\n",
    );
    assert_eq!(db.len(), 1);
    assert_eq!(db.lookup("a.b", None).unwrap(), Some("ok".to_string()));
}

#[test]
fn test_continuation_lines_fold_into_one_entry() {
    let db = Database::from_string("longer.value: one \\\ntwo \\\nthree\n");
    assert_eq!(
        db.lookup("longer.value", None).unwrap(),
        Some("one two three".to_string())
    );
}

#[test]
fn test_put_semantics_match_manual_iteration() {
    // combine(src, dst, override=true) must equal putting src's entries
    // onto dst one by one.
    let target_text = "a.b: 1\nc.d: 2\n";
    let source_text = "c.d: 20\ne.f: 30\n";

    let mut combined = Database::from_string(target_text);
    combined.combine(Database::from_string(source_text), true);

    let mut manual = Database::from_string(target_text);
    for entry in Database::from_string(source_text).iter() {
        manual.put(entry.clone());
    }

    assert_eq!(combined, manual);
}

#[test]
fn test_combine_discards_conflicts_without_override() {
    let mut target = Database::from_string("a.b: keep\n");
    target.combine(Database::from_string("a.b: lose\nx.y: new\n"), false);

    assert_eq!(target.lookup("a.b", None).unwrap(), Some("keep".to_string()));
    assert_eq!(target.lookup("x.y", None).unwrap(), Some("new".to_string()));
}

#[test]
fn test_combine_appends_in_source_order() {
    let mut target = Database::from_string("m: 0\n");
    target.combine(Database::from_string("x: 1\ny: 2\nz: 3\n"), true);

    let values: Vec<&str> = target.iter().map(|e| e.value()).collect();
    assert_eq!(values, ["0", "1", "2", "3"]);
}

#[test]
fn test_structural_identity_ignores_text_spelling() {
    // "a..b" collapses to the same structure as "a.b"; put must replace.
    let mut db = Database::new();
    db.put_resource_line("a.b: first");
    db.put_resource_line("a..b: second");
    assert_eq!(db.len(), 1);
    assert_eq!(db.lookup("a.b", None).unwrap(), Some("second".to_string()));
}

#[test]
fn test_round_trip_structural_equality() {
    let text = "Xft.dpi: 96\n\
                *background: gray\n\
                xterm*vt100.foreground: white\n\
                Foo.?.baz: 7\n\
                spaced.value: \\ padded\n";
    let db = Database::from_string(text);
    let reloaded = Database::from_string(&db.to_string());
    assert_eq!(db, reloaded);
    // The canonical form is a fixed point.
    assert_eq!(db.to_string(), reloaded.to_string());
}

#[test]
fn test_leading_space_value_round_trip() {
    let mut db = Database::new();
    db.put_resource("Foo.bar", " hello");

    let text = db.to_string();
    assert!(
        text.contains("\\ hello"),
        "leading space must serialize with the escape: {:?}",
        text
    );

    let reloaded = Database::from_string(&text);
    assert_eq!(
        reloaded.lookup("Foo.bar", None).unwrap(),
        Some(" hello".to_string())
    );
}

#[test]
fn test_space_only_value_round_trip() {
    let mut db = Database::new();
    db.put_resource("pad", " ");
    let reloaded = Database::from_string(&db.to_string());
    assert_eq!(reloaded.lookup("pad", None).unwrap(), Some(" ".to_string()));
}

#[test]
fn test_loose_leading_binding_serialization() {
    let mut db = Database::new();
    db.put_resource_line("*foo.bar: 1");
    db.put_resource_line("baz: 2");
    assert_eq!(db.to_string(), "*foo.bar: 1\nbaz: 2\n");
}

#[test]
fn test_put_resource_with_partial_specifier() {
    let mut db = Database::new();
    db.put_resource("*Menu.background", "dim gray");
    assert_eq!(
        db.lookup("app.main.Menu.background", None).unwrap(),
        Some("dim gray".to_string())
    );
}

#[test]
fn test_entry_parse_and_query_parse_are_exposed() {
    // The building blocks are usable on their own for callers that want
    // strict per-line handling instead of the lenient bulk load.
    let entry = Entry::parse("a*b: 1").unwrap();
    assert_eq!(entry.components().len(), 2);

    assert!(matches!(
        ResourceLine::parse("#include \"x.ad\"").unwrap(),
        ResourceLine::Include(path) if path == "x.ad"
    ));

    let query = Query::parse("a.b.c").unwrap();
    assert_eq!(query.len(), 3);
}

#[test]
fn test_serialize_empty_database() {
    assert_eq!(Database::new().to_string(), "");
}
