use super::{CatalogDialect, Cardinality, Dialect};

/// MySQL / MariaDB (`INFORMATION_SCHEMA`, `?` placeholders).
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl CatalogDialect for MySqlDialect {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn placeholder(&self, _n: usize) -> String {
        "?".to_string()
    }

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
            "AND {column} NOT IN ({})",
            self.placeholders(first_param, count)
        ))
    }

    fn insert_query(&self, skip_count: usize) -> String {
        let skip = self
            .skip_tables_predicate("c.TABLE_NAME", 2, skip_count)
            .unwrap_or_default();

        // GROUP_CONCAT output is capped by the session's group_concat_max_len.
        format!(
            r#"
SELECT
    CAST(CONCAT(
        'INSERT INTO ', c.TABLE_NAME,
        ' (', GROUP_CONCAT(c.COLUMN_NAME ORDER BY c.ORDINAL_POSITION SEPARATOR ', '), ') ',
        'VALUES (', GROUP_CONCAT('?' ORDER BY c.ORDINAL_POSITION SEPARATOR ', '), ');'
    ) AS CHAR) AS insert_statement
FROM INFORMATION_SCHEMA.COLUMNS c
JOIN INFORMATION_SCHEMA.TABLES t
  ON t.TABLE_SCHEMA = c.TABLE_SCHEMA
 AND t.TABLE_NAME = c.TABLE_NAME
WHERE c.TABLE_SCHEMA = ?
  AND t.TABLE_TYPE = 'BASE TABLE'
  AND c.EXTRA NOT LIKE '%auto_increment%'
  AND c.EXTRA NOT LIKE '%VIRTUAL GENERATED%'
  AND c.EXTRA NOT LIKE '%STORED GENERATED%'
  {skip}
GROUP BY c.TABLE_SCHEMA, c.TABLE_NAME
ORDER BY c.TABLE_NAME
"#
        )
    }

    fn select_by_pk_query(&self, skip_count: usize) -> String {
        let skip = self
            .skip_tables_predicate("c.TABLE_NAME", 2, skip_count)
            .unwrap_or_default();

        format!(
            r#"
SELECT
    CAST(CONCAT(
        'SELECT ', GROUP_CONCAT(c.COLUMN_NAME ORDER BY c.ORDINAL_POSITION SEPARATOR ', '),
        ' FROM ', c.TABLE_NAME,
        ' WHERE ', GROUP_CONCAT(
            CASE WHEN k.COLUMN_NAME IS NOT NULL THEN CONCAT(c.COLUMN_NAME, ' = ?') END
            ORDER BY c.ORDINAL_POSITION SEPARATOR ' AND '
        ),
        ';'
    ) AS CHAR) AS select_statement
FROM INFORMATION_SCHEMA.COLUMNS c
JOIN INFORMATION_SCHEMA.TABLES t
  ON t.TABLE_SCHEMA = c.TABLE_SCHEMA
 AND t.TABLE_NAME = c.TABLE_NAME
LEFT JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE k
  ON k.TABLE_SCHEMA = c.TABLE_SCHEMA
 AND k.TABLE_NAME = c.TABLE_NAME
 AND k.COLUMN_NAME = c.COLUMN_NAME
 AND k.CONSTRAINT_NAME = 'PRIMARY'
WHERE c.TABLE_SCHEMA = ?
  AND t.TABLE_TYPE = 'BASE TABLE'
  {skip}
GROUP BY c.TABLE_SCHEMA, c.TABLE_NAME
HAVING COUNT(k.COLUMN_NAME) > 0
ORDER BY c.TABLE_NAME
"#
        )
    }

    fn create_cardinality(&self) -> Cardinality {
        Cardinality::Exec
    }
}
