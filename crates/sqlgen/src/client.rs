//! Database client trait for catalog queries
//!
//! The catalog queries return one text column per row. This module hides how
//! each driver binds the schema and skip-list parameters and decodes that
//! column.

use crate::catalog::CatalogQuery;
use crate::error::{SqlgenError, SqlgenResult};
use sqlx::Row as _;
use tokio_postgres::types::ToSql;

/// A connection that can run catalog queries.
///
/// Implemented for `tokio_postgres::Client` and `sqlx::MySqlConnection`.
#[async_trait::async_trait]
pub trait CatalogClient: Send {
    /// Run `query` and return the statement column of every row, in order.
    async fn fetch_statements(&mut self, query: &CatalogQuery<'_>) -> SqlgenResult<Vec<String>>;
}

#[async_trait::async_trait]
impl CatalogClient for tokio_postgres::Client {
    async fn fetch_statements(&mut self, query: &CatalogQuery<'_>) -> SqlgenResult<Vec<String>> {
        let schema = query.schema;
        let skip_tables = query.skip_tables;

        let mut params: Vec<&(dyn ToSql + Sync)> = vec![&schema];
        if !skip_tables.is_empty() {
            params.push(&skip_tables);
        }

        let rows = self.query(query.sql.as_str(), &params).await?;
        rows.iter()
            .map(|row| {
                row.try_get::<_, String>(query.column)
                    .map_err(|e| SqlgenError::decode(query.column, e.to_string()))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl CatalogClient for sqlx::MySqlConnection {
    async fn fetch_statements(&mut self, query: &CatalogQuery<'_>) -> SqlgenResult<Vec<String>> {
        let mut q = sqlx::query(&query.sql).bind(query.schema);
        for table in query.skip_tables {
            q = q.bind(table.as_str());
        }

        let rows = q.fetch_all(&mut *self).await?;
        rows.iter()
            .map(|row| {
                row.try_get::<String, _>(query.column)
                    .map_err(SqlgenError::from)
            })
            .collect()
    }
}
