//! Database experiments: store words documents in SQLite three ways.
//!
//! - [`sqlite`] talks to the driver directly
//! - [`litealchemy`] goes through the [`query`] builder
//! - [`ormlite`] maps rows to [`WordsDocument`] records through an [`orm::Session`]
//!
//! All three share the `words` table, so they can be run in any order
//! against the same file.

pub mod orm;
pub mod query;

use std::io::Write;
use std::path::{Path, PathBuf};

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;

use super::{RULE, xml};

pub use orm::{Model, Session, WordsDocument};
pub use query::{Column, ColumnConstraint, DataType, Order, Table};

pub const DEFAULT_DATABASE: &str = "words.db";
pub const WORDS_TABLE: &str = "words";

const CREATING_TABLE: &str = "Creating words table.";

/// Where the experiments keep their data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open (creating if needed) the database file.
    pub fn open(&self) -> Result<Connection> {
        tracing::debug!(target: "snmp_adapter::experiments", { db.path = %self.path.display() }, "opening database");
        Ok(Connection::open(&self.path)?)
    }
}

/// Raw driver calls: check for the table, create it, insert, dump.
pub fn sqlite(out: &mut impl Write, text: &str, config: &DbConfig) -> Result<()> {
    let conn = config.open()?;

    let existing: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='words';",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_none() {
        writeln!(out, "{CREATING_TABLE}")?;
        conn.execute(
            "CREATE TABLE words (id INTEGER PRIMARY KEY AUTOINCREMENT, xml TEXT NOT NULL);",
            [],
        )?;
    }

    let doc = xml::words_xml(text)?;
    conn.execute("INSERT INTO words (xml) VALUES (?1);", params![doc])?;
    tracing::debug!(target: "snmp_adapter::experiments", { db.table = WORDS_TABLE, db.rowid = conn.last_insert_rowid() }, "inserted words document");

    writeln!(out, "{RULE}")?;
    let mut stmt = conn.prepare("SELECT * FROM words;")?;
    let rows = stmt.query_map([], |row| {
        Ok(vec![row.get::<_, SqlValue>(0)?, row.get::<_, SqlValue>(1)?])
    })?;
    for row in rows {
        writeln!(out, "{}", render_row(&row?))?;
    }
    Ok(())
}

/// Query builder: typed schema, generated SQL, bound parameters.
pub fn litealchemy(out: &mut impl Write, text: &str, config: &DbConfig) -> Result<()> {
    let conn = config.open()?;
    let words = Table::words();

    if words.create_if_missing(&conn)? {
        writeln!(out, "{CREATING_TABLE}")?;
    }

    words
        .insert()
        .value("xml", xml::words_xml(text)?)
        .execute(&conn)?;

    writeln!(out, "{RULE}")?;
    for row in words.select().order_by("id", Order::Asc).fetch(&conn)? {
        writeln!(out, "{}", render_row(&row))?;
    }
    Ok(())
}

/// Object mapper: records in, records out.
pub fn ormlite(out: &mut impl Write, text: &str, config: &DbConfig) -> Result<()> {
    let session = Session::open(config)?;

    if session.create_table::<WordsDocument>()? {
        writeln!(out, "{CREATING_TABLE}")?;
    }

    let mut doc = WordsDocument::new(xml::words_xml(text)?);
    session.add(&mut doc)?;

    writeln!(out, "{RULE}")?;
    for record in session.all::<WordsDocument>()? {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

/// `(1, 'text')`
pub fn render_row(values: &[SqlValue]) -> String {
    let fields: Vec<String> = values.iter().map(render_value).collect();
    match fields.as_slice() {
        [single] => format!("({single},)"),
        _ => format!("({})", fields.join(", ")),
    }
}

pub fn render_value(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "None".to_string(),
        SqlValue::Integer(n) => n.to_string(),
        SqlValue::Real(f) => f.to_string(),
        SqlValue::Text(s) => quote(s),
        SqlValue::Blob(bytes) => format!("b'{}'", bytes.escape_ascii()),
    }
}

/// Single-quoted, with `\` and `'` escaped.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
