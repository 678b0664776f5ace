use super::{CatalogDialect, Cardinality, Dialect};

/// PostgreSQL (`information_schema`, `$n` placeholders).
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl CatalogDialect for PostgresDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn placeholder(&self, n: usize) -> String {
        format!("${n}")
    }

    // The whole skip list is bound as a single `text[]`.
    fn skip_tables_predicate(
        &self,
        column: &str,
        first_param: usize,
        count: usize,
    ) -> Option<String> {
        if count == 0 {
            return None;
        }
        Some(format!(
            "AND NOT ({column}::text = ANY({}::text[]))",
            self.placeholder(first_param)
        ))
    }

    fn insert_query(&self, skip_count: usize) -> String {
        let skip = self
            .skip_tables_predicate("c.table_name", 2, skip_count)
            .unwrap_or_default();

        format!(
            r#"
WITH column_with_placeholders AS (
    SELECT
        c.table_schema,
        c.table_name,
        c.column_name,
        c.ordinal_position,
        '$' || ROW_NUMBER() OVER (
            PARTITION BY c.table_schema, c.table_name ORDER BY c.ordinal_position
        ) AS placeholder
    FROM information_schema.columns c
    JOIN information_schema.tables t
      ON t.table_schema = c.table_schema
     AND t.table_name = c.table_name
    WHERE c.table_schema::text = $1
      AND t.table_type = 'BASE TABLE'
      AND (c.column_default IS NULL OR c.column_default NOT LIKE 'nextval(%')
      AND c.is_identity = 'NO'
      AND c.is_generated = 'NEVER'
      {skip}
)
SELECT
    'INSERT INTO ' || table_name ||
    ' (' || string_agg(column_name::text, ', ' ORDER BY ordinal_position) || ') ' ||
    'VALUES (' || string_agg(placeholder, ', ' ORDER BY ordinal_position) || ') RETURNING *;'
    AS insert_statement
FROM column_with_placeholders
GROUP BY table_schema, table_name
ORDER BY table_name
"#
        )
    }

    fn select_by_pk_query(&self, skip_count: usize) -> String {
        let skip = self
            .skip_tables_predicate("c.table_name", 2, skip_count)
            .unwrap_or_default();

        format!(
            r#"
WITH column_list AS (
    SELECT
        c.table_schema,
        c.table_name,
        c.column_name,
        c.ordinal_position
    FROM information_schema.columns c
    JOIN information_schema.tables t
      ON t.table_schema = c.table_schema
     AND t.table_name = c.table_name
    WHERE c.table_schema::text = $1
      AND t.table_type = 'BASE TABLE'
      {skip}
),
primary_keys AS (
    SELECT
        kcu.table_schema,
        kcu.table_name,
        kcu.column_name,
        ROW_NUMBER() OVER (
            PARTITION BY kcu.table_schema, kcu.table_name ORDER BY kcu.column_name
        ) AS placeholder_number
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
      ON tc.constraint_name = kcu.constraint_name
     AND tc.table_schema = kcu.table_schema
     AND tc.table_name = kcu.table_name
    WHERE tc.constraint_type = 'PRIMARY KEY'
      AND kcu.table_schema::text = $1
),
where_pk AS (
    SELECT
        pk.table_schema,
        pk.table_name,
        string_agg(
            pk.column_name::text || ' = $' || pk.placeholder_number,
            ' AND ' ORDER BY pk.placeholder_number
        ) AS cond
    FROM primary_keys pk
    GROUP BY pk.table_schema, pk.table_name
)
SELECT
    'SELECT ' || string_agg(cl.column_name::text, ', ' ORDER BY cl.ordinal_position) ||
    ' FROM ' || cl.table_name ||
    ' WHERE ' || pk.cond || ';'
    AS select_statement
FROM column_list cl
JOIN where_pk pk
  ON cl.table_schema = pk.table_schema
 AND cl.table_name = pk.table_name
GROUP BY cl.table_schema, cl.table_name, pk.cond
ORDER BY cl.table_name
"#
        )
    }

    fn create_cardinality(&self) -> Cardinality {
        Cardinality::One
    }
}
