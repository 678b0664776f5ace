use crate::cli::GenerateArgs;
use crate::config::Settings;
use crate::connect;
use sqlgen::{Dialect, Statement, generate_statements, parse_dsn, sqlc_comment};
use std::fmt::Write as _;
use std::io::Write as _;
use tracing::info;

pub async fn run(dialect: Dialect, args: GenerateArgs) -> anyhow::Result<()> {
    let settings = Settings::resolve(dialect, &args)?;
    let descriptor = parse_dsn(&settings.dsn)?;
    connect::check_protocol(dialect, &descriptor)?;
    let schema = settings.target_schema(&descriptor)?;

    info!(
        dsn = %descriptor,
        schema = %schema,
        skip_tables = ?settings.skip_tables,
        "generating statements"
    );

    let statements = match dialect {
        Dialect::MySql => {
            use sqlx::Connection as _;

            let mut conn = connect::connect_mysql(&descriptor).await?;
            let statements =
                generate_statements(&mut conn, dialect, &schema, &settings.skip_tables).await?;
            conn.close().await?;
            statements
        }
        Dialect::Postgres => {
            let mut client = connect::connect_postgres(&descriptor).await?;
            generate_statements(&mut client, dialect, &schema, &settings.skip_tables).await?
        }
    };

    info!(statements = statements.len(), "generation finished");

    let out = render(dialect, &statements, settings.sqlc)?;
    std::io::stdout().lock().write_all(out.as_bytes())?;
    Ok(())
}

/// One statement per line; in sqlc mode each gets a `-- name:` line above it
/// and a blank line below.
pub fn render(dialect: Dialect, statements: &[Statement], sqlc: bool) -> anyhow::Result<String> {
    let mut out = String::new();
    for stmt in statements {
        if sqlc {
            writeln!(out, "{}", sqlc_comment(dialect, &stmt.sql, stmt.action)?)?;
        }
        writeln!(out, "{}", stmt.sql)?;
        if sqlc {
            out.push('\n');
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlgen::Action;

    fn stmt(action: Action, sql: &str) -> Statement {
        Statement {
            action,
            sql: sql.to_string(),
        }
    }

    #[test]
    fn plain_output_is_one_line_per_statement() {
        let out = render(
            Dialect::MySql,
            &[
                stmt(Action::Create, "INSERT INTO users (name) VALUES (?);"),
                stmt(Action::Read, "SELECT id, name FROM users WHERE id = ?;"),
            ],
            false,
        )
        .unwrap();

        assert_eq!(
            out,
            "INSERT INTO users (name) VALUES (?);\nSELECT id, name FROM users WHERE id = ?;\n"
        );
    }

    #[test]
    fn sqlc_output_adds_comments_and_spacing() {
        let out = render(
            Dialect::Postgres,
            &[
                stmt(
                    Action::Create,
                    "INSERT INTO user_profiles (bio) VALUES ($1) RETURNING *;",
                ),
                stmt(
                    Action::Read,
                    "SELECT id, bio FROM user_profiles WHERE id = $1;",
                ),
            ],
            true,
        )
        .unwrap();

        assert_eq!(
            out,
            "-- name: CreateUserProfile :one\n\
             INSERT INTO user_profiles (bio) VALUES ($1) RETURNING *;\n\
             \n\
             -- name: GetUserProfileByPk :one\n\
             SELECT id, bio FROM user_profiles WHERE id = $1;\n\
             \n"
        );
    }

    #[test]
    fn empty_schema_prints_nothing() {
        assert_eq!(render(Dialect::MySql, &[], true).unwrap(), "");
    }

    #[test]
    fn unparseable_statement_fails_in_sqlc_mode_only() {
        let bad = [stmt(Action::Create, "VALUES (1);")];
        assert!(render(Dialect::MySql, &bad, true).is_err());
        assert_eq!(render(Dialect::MySql, &bad, false).unwrap(), "VALUES (1);\n");
    }
}
