//! Database experiments against a temporary SQLite file.

use snmp_adapter::experiments::RULE;
use snmp_adapter::experiments::db::{self, DbConfig, Session, WordsDocument};
use tempfile::TempDir;

fn database() -> (TempDir, DbConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("words.db"));
    (dir, config)
}

fn lines(out: Vec<u8>) -> Vec<String> {
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn sqlite_creates_table_once() {
    let (_dir, config) = database();

    let mut first = Vec::new();
    db::sqlite(&mut first, "spam", &config).unwrap();
    let first = lines(first);
    assert_eq!(first[0], "Creating words table.");
    assert_eq!(first[1], RULE);
    assert_eq!(first.len(), 3);
    assert!(first[2].starts_with("(1, '<!DOCTYPE xml><root><timestamp>"));
    assert!(first[2].ends_with("<word>spam</word></words></root>')"));

    let mut second = Vec::new();
    db::sqlite(&mut second, "eggs", &config).unwrap();
    let second = lines(second);
    assert_eq!(second[0], RULE);
    assert_eq!(second.len(), 3);
    assert!(second[1].starts_with("(1, "));
    assert!(second[2].starts_with("(2, "));
    assert!(second[2].contains("<word>eggs</word>"));
}

#[test]
fn all_three_share_the_table() {
    let (_dir, config) = database();

    let mut out = Vec::new();
    db::litealchemy(&mut out, "one", &config).unwrap();
    assert_eq!(lines(out)[0], "Creating words table.");

    let mut out = Vec::new();
    db::sqlite(&mut out, "two", &config).unwrap();
    let out = lines(out);
    assert_eq!(out[0], RULE);
    assert_eq!(out.len(), 3);

    let mut out = Vec::new();
    db::ormlite(&mut out, "three", &config).unwrap();
    let out = lines(out);
    assert_eq!(out[0], RULE);
    assert_eq!(out.len(), 4);
    assert!(out[1].starts_with("WordsDocument(id=1, xml='<!DOCTYPE xml>"));
    assert!(out[1].contains("<word>one</word>"));
    assert!(out[3].starts_with("WordsDocument(id=3, "));
    assert!(out[3].contains("<word>three</word>"));
}

#[test]
fn ormlite_creates_table_when_missing() {
    let (_dir, config) = database();

    let mut out = Vec::new();
    db::ormlite(&mut out, "", &config).unwrap();
    let out = lines(out);
    assert_eq!(out[0], "Creating words table.");
    assert!(out[2].contains(r#"<words myattribute="So many pretty words!"></words>"#));
}

#[test]
fn session_reads_what_experiments_wrote() {
    let (_dir, config) = database();
    db::litealchemy(&mut Vec::new(), "a b c", &config).unwrap();

    let session = Session::open(&config).unwrap();
    let docs = session.all::<WordsDocument>().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, Some(1));
    assert!(docs[0].xml.contains("<word>a</word><word>b</word><word>c</word>"));
}

#[test]
fn unopenable_path_is_a_database_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("missing").join("words.db"));

    let err = db::sqlite(&mut Vec::new(), "x", &config).unwrap_err();
    assert!(matches!(*err, snmp_adapter::Error::Database(_)), "{err}");
}
