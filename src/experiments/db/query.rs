//! A small typed query builder over rusqlite.
//!
//! Tables are described once as data; statements are rendered to SQL text
//! and executed with bound parameters.
//!
//! ```
//! use snmp_adapter::experiments::db::{Order, Table};
//!
//! let words = Table::words();
//! assert_eq!(
//!     words.create_sql(),
//!     "CREATE TABLE words (id INTEGER PRIMARY KEY AUTOINCREMENT, xml TEXT NOT NULL)"
//! );
//! let insert = words.insert().value("xml", "<root/>".to_string());
//! assert_eq!(insert.to_sql().unwrap(), "INSERT INTO words (xml) VALUES (?1)");
//! assert_eq!(
//!     words.select().order_by("id", Order::Desc).to_sql().unwrap(),
//!     "SELECT id, xml FROM words ORDER BY id DESC"
//! );
//! ```

use std::fmt;

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::error::{Error, Result};

use super::WORDS_TABLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Real,
    Text,
    Blob,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataType::Integer => "INTEGER",
            DataType::Real => "REAL",
            DataType::Text => "TEXT",
            DataType::Blob => "BLOB",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    Autoincrement,
    NotNull,
    Unique,
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::Autoincrement => "AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
            ColumnConstraint::Unique => "UNIQUE",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn definition(&self) -> String {
        let mut def = format!("{} {}", self.name, self.data_type);
        for constraint in &self.constraints {
            def.push(' ');
            def.push_str(&constraint.to_string());
        }
        def
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// `words (id INTEGER PRIMARY KEY AUTOINCREMENT, xml TEXT NOT NULL)`
    pub fn words() -> Self {
        Table::new(WORDS_TABLE)
            .column(
                Column::new("id", DataType::Integer)
                    .constraint(ColumnConstraint::PrimaryKey)
                    .constraint(ColumnConstraint::Autoincrement),
            )
            .column(Column::new("xml", DataType::Text).constraint(ColumnConstraint::NotNull))
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn require(&self, name: &str) -> Result<&Column> {
        self.get(name)
            .ok_or_else(|| Error::config(format!("table {} has no column {}", self.name, name)))
    }

    pub fn create_sql(&self) -> String {
        let defs: Vec<String> = self.columns.iter().map(Column::definition).collect();
        format!("CREATE TABLE {} ({})", self.name, defs.join(", "))
    }

    pub fn exists(&self, conn: &Connection) -> Result<bool> {
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![self.name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Create the table unless it exists. Returns whether it was created.
    pub fn create_if_missing(&self, conn: &Connection) -> Result<bool> {
        if self.exists(conn)? {
            return Ok(false);
        }
        conn.execute(&self.create_sql(), [])?;
        tracing::debug!(target: "snmp_adapter::experiments", { db.table = %self.name }, "created table");
        Ok(true)
    }

    pub fn insert(&self) -> Insert<'_> {
        Insert {
            table: self,
            values: Vec::new(),
        }
    }

    pub fn select(&self) -> Select<'_> {
        Select {
            table: self,
            order_by: Vec::new(),
        }
    }
}

/// `INSERT INTO table (cols) VALUES (?1, ...)`
#[derive(Debug, Clone)]
pub struct Insert<'t> {
    table: &'t Table,
    values: Vec<(String, SqlValue)>,
}

impl Insert<'_> {
    pub fn value(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.values.push((column.to_string(), value.into()));
        self
    }

    pub fn to_sql(&self) -> Result<String> {
        if self.values.is_empty() {
            return Err(Error::config(format!("insert into {} has no values", self.table.name)));
        }
        let mut columns = Vec::with_capacity(self.values.len());
        for (name, _) in &self.values {
            columns.push(self.table.require(name)?.name.as_str());
        }
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table.name,
            columns.join(", "),
            placeholders.join(", ")
        ))
    }

    /// Run the insert and return the new rowid.
    pub fn execute(&self, conn: &Connection) -> Result<i64> {
        let sql = self.to_sql()?;
        conn.execute(&sql, params_from_iter(self.values.iter().map(|(_, v)| v)))?;
        let rowid = conn.last_insert_rowid();
        tracing::debug!(target: "snmp_adapter::experiments", { db.table = %self.table.name, db.rowid = rowid }, "inserted row");
        Ok(rowid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// `SELECT cols FROM table [ORDER BY ...]`
#[derive(Debug, Clone)]
pub struct Select<'t> {
    table: &'t Table,
    order_by: Vec<(String, Order)>,
}

impl Select<'_> {
    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order_by.push((column.to_string(), order));
        self
    }

    pub fn to_sql(&self) -> Result<String> {
        let columns: Vec<&str> = self.table.columns.iter().map(|c| c.name.as_str()).collect();
        let mut sql = format!("SELECT {} FROM {}", columns.join(", "), self.table.name);
        if !self.order_by.is_empty() {
            let mut terms = Vec::with_capacity(self.order_by.len());
            for (name, order) in &self.order_by {
                let column = self.table.require(name)?;
                let direction = match order {
                    Order::Asc => "ASC",
                    Order::Desc => "DESC",
                };
                terms.push(format!("{} {}", column.name, direction));
            }
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }
        Ok(sql)
    }

    /// All matching rows, one value per table column.
    pub fn fetch(&self, conn: &Connection) -> Result<Vec<Vec<SqlValue>>> {
        let sql = self.to_sql()?;
        let width = self.table.columns.len();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            (0..width)
                .map(|i| row.get::<_, SqlValue>(i))
                .collect::<rusqlite::Result<Vec<SqlValue>>>()
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
