//! Dialect-specific catalog queries.
//!
//! Each supported database has one [`CatalogDialect`] implementation that knows
//! its placeholder syntax and how to ask its catalog for ready-to-use
//! `INSERT` and `SELECT ... WHERE <pk>` statements. [`Dialect`] picks the
//! implementation at startup.
//!
//! # Example
//!
//! ```ignore
//! use sqlgen::Dialect;
//!
//! let strategy = Dialect::Postgres.strategy();
//! assert_eq!(strategy.placeholder(3), "$3");
//! let sql = strategy.insert_query(2); // schema + a two-table skip list
//! ```

mod mysql;
mod postgres;


pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

use std::fmt;

/// Supported database dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    Postgres,
}

impl Dialect {
    /// The query strategy for this dialect.
    pub fn strategy(self) -> &'static dyn CatalogDialect {
        match self {
            Dialect::MySql => &MySqlDialect,
            Dialect::Postgres => &PostgresDialect,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// sqlc result cardinality annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Exec,
    One,
}

impl Cardinality {
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::Exec => ":exec",
            Cardinality::One => ":one",
        }
    }
}

/// Catalog query builder for one dialect.
///
/// Both generated queries take the schema name as their first parameter,
/// followed by the skip list (if any). Each result row holds one finished
/// statement, ordered by table name.
pub trait CatalogDialect: Sync {
    fn dialect(&self) -> Dialect;

    /// Positional placeholder for the `n`-th (1-based) parameter.
    fn placeholder(&self, n: usize) -> String;

    /// `count` comma-separated placeholders starting at parameter `first`.
    fn placeholders(&self, first: usize, count: usize) -> String {
        (first..first + count)
            .map(|n| self.placeholder(n))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Extra `AND ...` filter excluding `count` bound table names.
    ///
    /// Returns `None` when there is nothing to skip.
    fn skip_tables_predicate(&self, column: &str, first_param: usize, count: usize)
    -> Option<String>;

    /// Query producing one `INSERT` per table, leaving out auto-generated columns.
    fn insert_query(&self, skip_count: usize) -> String;

    /// Query producing one `SELECT` by primary key per table that has one.
    fn select_by_pk_query(&self, skip_count: usize) -> String;

    /// Cardinality sqlc should use for the generated `INSERT`.
    fn create_cardinality(&self) -> Cardinality;
}
