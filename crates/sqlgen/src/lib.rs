//! sqlgen
//!
//! Generates boilerplate SQL from a live database catalog: one `INSERT` and one
//! `SELECT ... WHERE <primary key>` per table, for MySQL (`INFORMATION_SCHEMA`)
//! or PostgreSQL (`information_schema`). Statements can be labelled with sqlc
//! `-- name:` directives.
//!
//! # Example
//!
//! ```ignore
//! use sqlgen::{Dialect, generate_statements, sqlc_comment};
//!
//! let (mut client, connection) = tokio_postgres::connect(dsn, tokio_postgres::NoTls).await?;
//! tokio::spawn(connection);
//!
//! let skip = vec!["schema_migrations".to_string()];
//! for stmt in generate_statements(&mut client, Dialect::Postgres, "public", &skip).await? {
//!     println!("{}", sqlc_comment(Dialect::Postgres, &stmt.sql, stmt.action)?);
//!     println!("{}", stmt.sql);
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod comment;
pub mod dialect;
pub mod dsn;
pub mod error;
pub mod naming;

pub use catalog::{
    CatalogQuery, Statement, generate_statements, insert_statements, select_by_pk_statements,
};
pub use client::CatalogClient;
pub use comment::{Action, sqlc_comment};
pub use dialect::{Cardinality, CatalogDialect, Dialect, MySqlDialect, PostgresDialect};
pub use dsn::{ConnectionDescriptor, DsnError, parse_dsn};
pub use error::{SqlgenError, SqlgenResult};
pub use naming::{extract_table_name, singularize, snake_to_pascal};
