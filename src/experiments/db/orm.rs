//! A tiny object mapper: one struct per table, rows in and out.

use std::fmt;

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, Row};

use crate::error::Result;

use super::query::{Column, ColumnConstraint, DataType, Order, Table};
use super::{DbConfig, WORDS_TABLE, quote};

/// A record type stored in its own table.
///
/// The first column is always an `INTEGER PRIMARY KEY AUTOINCREMENT` named
/// `id`; [`COLUMNS`](Model::COLUMNS) lists the rest, in the order
/// [`values`](Model::values) and [`from_row`](Model::from_row) use.
pub trait Model: Sized {
    const TABLE: &'static str;
    const COLUMNS: &'static [(&'static str, DataType)];

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);
    fn values(&self) -> Vec<SqlValue>;
    /// Build a record from `SELECT id, COLUMNS... FROM TABLE`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn table() -> Table {
        Self::COLUMNS.iter().fold(
            Table::new(Self::TABLE).column(
                Column::new("id", DataType::Integer)
                    .constraint(ColumnConstraint::PrimaryKey)
                    .constraint(ColumnConstraint::Autoincrement),
            ),
            |table, (name, data_type)| {
                table.column(Column::new(*name, *data_type).constraint(ColumnConstraint::NotNull))
            },
        )
    }
}

/// A connection plus the mapping operations.
pub struct Session {
    conn: Connection,
}

impl Session {
    pub fn open(config: &DbConfig) -> Result<Self> {
        Ok(Self { conn: config.open()? })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns whether the table had to be created.
    pub fn create_table<M: Model>(&self) -> Result<bool> {
        M::table().create_if_missing(&self.conn)
    }

    /// Insert `record` and give it its new id.
    pub fn add<M: Model>(&self, record: &mut M) -> Result<()> {
        let table = M::table();
        let mut insert = table.insert();
        for ((name, _), value) in M::COLUMNS.iter().zip(record.values()) {
            insert = insert.value(name, value);
        }
        let id = insert.execute(&self.conn)?;
        record.set_id(id);
        Ok(())
    }

    /// Every record, by ascending id.
    pub fn all<M: Model>(&self) -> Result<Vec<M>> {
        let table = M::table();
        let sql = table.select().order_by("id", Order::Asc).to_sql()?;
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], M::from_row)?
            .collect::<rusqlite::Result<Vec<M>>>()?;
        tracing::debug!(target: "snmp_adapter::experiments", { db.table = M::TABLE, db.rows = records.len() }, "loaded records");
        Ok(records)
    }
}

/// One stored words document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordsDocument {
    pub id: Option<i64>,
    pub xml: String,
}

impl WordsDocument {
    pub fn new(xml: impl Into<String>) -> Self {
        Self {
            id: None,
            xml: xml.into(),
        }
    }
}

impl Model for WordsDocument {
    const TABLE: &'static str = WORDS_TABLE;
    const COLUMNS: &'static [(&'static str, DataType)] = &[("xml", DataType::Text)];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::Text(self.xml.clone())]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            xml: row.get(1)?,
        })
    }
}

impl fmt::Display for WordsDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "WordsDocument(id={}, xml={})", id, quote(&self.xml)),
            None => write!(f, "WordsDocument(id=None, xml={})", quote(&self.xml)),
        }
    }
}
