//! Statement generation from the database catalog.

use crate::client::CatalogClient;
use crate::comment::Action;
use crate::dialect::Dialect;
use crate::error::SqlgenResult;
use tracing::debug;

/// A catalog query plus the values to bind to it.
#[derive(Debug, Clone)]
pub struct CatalogQuery<'a> {
    pub sql: String,
    /// Name of the result column holding the generated statement.
    pub column: &'static str,
    pub schema: &'a str,
    pub skip_tables: &'a [String],
}

impl<'a> CatalogQuery<'a> {
    pub fn insert(dialect: Dialect, schema: &'a str, skip_tables: &'a [String]) -> Self {
        Self {
            sql: dialect.strategy().insert_query(skip_tables.len()),
            column: "insert_statement",
            schema,
            skip_tables,
        }
    }

    pub fn select_by_pk(dialect: Dialect, schema: &'a str, skip_tables: &'a [String]) -> Self {
        Self {
            sql: dialect.strategy().select_by_pk_query(skip_tables.len()),
            column: "select_statement",
            schema,
            skip_tables,
        }
    }

    pub fn for_action(
        action: Action,
        dialect: Dialect,
        schema: &'a str,
        skip_tables: &'a [String],
    ) -> Self {
        match action {
            Action::Create => Self::insert(dialect, schema, skip_tables),
            Action::Read => Self::select_by_pk(dialect, schema, skip_tables),
        }
    }
}

/// One generated statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub action: Action,
    pub sql: String,
}

/// `INSERT` statements for every table in `schema`, sorted by table name.
pub async fn insert_statements<C>(
    client: &mut C,
    dialect: Dialect,
    schema: &str,
    skip_tables: &[String],
) -> SqlgenResult<Vec<String>>
where
    C: CatalogClient + ?Sized,
{
    run(client, CatalogQuery::insert(dialect, schema, skip_tables)).await
}

/// `SELECT ... WHERE <pk>` statements for every table in `schema` with a
/// primary key, sorted by table name.
pub async fn select_by_pk_statements<C>(
    client: &mut C,
    dialect: Dialect,
    schema: &str,
    skip_tables: &[String],
) -> SqlgenResult<Vec<String>>
where
    C: CatalogClient + ?Sized,
{
    run(client, CatalogQuery::select_by_pk(dialect, schema, skip_tables)).await
}

/// All statements for `schema`: the inserts first, then the selects.
///
/// Stops at the first failing query.
pub async fn generate_statements<C>(
    client: &mut C,
    dialect: Dialect,
    schema: &str,
    skip_tables: &[String],
) -> SqlgenResult<Vec<Statement>>
where
    C: CatalogClient + ?Sized,
{
    let mut out = Vec::new();
    for action in [Action::Create, Action::Read] {
        let query = CatalogQuery::for_action(action, dialect, schema, skip_tables);
        let rows = run(client, query).await?;
        out.extend(rows.into_iter().map(|sql| Statement { action, sql }));
    }
    Ok(out)
}

async fn run<C>(client: &mut C, query: CatalogQuery<'_>) -> SqlgenResult<Vec<String>>
where
    C: CatalogClient + ?Sized,
{
    debug!(
        column = query.column,
        schema = query.schema,
        skip_tables = query.skip_tables.len(),
        "running catalog query"
    );
    let rows = client.fetch_statements(&query).await?;
    debug!(column = query.column, rows = rows.len(), "catalog query finished");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned rows and records every query it receives.
    #[derive(Default)]
    struct ScriptedClient {
        responses: VecDeque<SqlgenResult<Vec<String>>>,
        seen: Vec<(String, &'static str, String, Vec<String>)>,
    }

    #[async_trait::async_trait]
    impl CatalogClient for ScriptedClient {
        async fn fetch_statements(
            &mut self,
            query: &CatalogQuery<'_>,
        ) -> SqlgenResult<Vec<String>> {
            self.seen.push((
                query.sql.clone(),
                query.column,
                query.schema.to_string(),
                query.skip_tables.to_vec(),
            ));
            self.responses.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    #[tokio::test]
    async fn inserts_come_before_selects() {
        let mut client = ScriptedClient {
            responses: VecDeque::from([
                Ok(vec![
                    "INSERT INTO posts (title) VALUES (?);".to_string(),
                    "INSERT INTO users (name) VALUES (?);".to_string(),
                ]),
                Ok(vec!["SELECT id, name FROM users WHERE id = ?;".to_string()]),
            ]),
            ..Default::default()
        };
        let skip = vec!["tags".to_string()];

        let stmts = generate_statements(&mut client, Dialect::MySql, "app", &skip)
            .await
            .unwrap();

        let actions: Vec<Action> = stmts.iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![Action::Create, Action::Create, Action::Read]);
        assert_eq!(stmts[2].sql, "SELECT id, name FROM users WHERE id = ?;");

        assert_eq!(client.seen.len(), 2);
        assert_eq!(client.seen[0].1, "insert_statement");
        assert_eq!(client.seen[1].1, "select_statement");
        for (sql, _, schema, skip_tables) in &client.seen {
            assert!(sql.contains("NOT IN (?)"));
            assert_eq!(schema, "app");
            assert_eq!(skip_tables, &skip);
        }
    }

    #[tokio::test]
    async fn first_error_aborts() {
        let mut client = ScriptedClient {
            responses: VecDeque::from([Err(crate::SqlgenError::Query("boom".to_string()))]),
            ..Default::default()
        };

        let err = generate_statements(&mut client, Dialect::Postgres, "public", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, crate::SqlgenError::Query(_)));
        assert_eq!(client.seen.len(), 1);
    }

    #[tokio::test]
    async fn single_kind_helpers_use_their_own_query() {
        let mut client = ScriptedClient::default();
        insert_statements(&mut client, Dialect::Postgres, "public", &[])
            .await
            .unwrap();
        select_by_pk_statements(&mut client, Dialect::Postgres, "public", &[])
            .await
            .unwrap();

        assert!(client.seen[0].0.contains("RETURNING *"));
        assert!(client.seen[1].0.contains("PRIMARY KEY"));
    }
}
