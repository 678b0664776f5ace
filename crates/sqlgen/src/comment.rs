//! sqlc query annotations (`-- name: CreateUser :exec`).

use crate::dialect::{Cardinality, Dialect};
use crate::error::{SqlgenError, SqlgenResult};
use crate::naming::{extract_table_name, singularize, snake_to_pascal};
use std::fmt;
use std::str::FromStr;

/// What a generated statement does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `INSERT`
    Create,
    /// `SELECT ... WHERE <pk>`
    Read,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = SqlgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            other => Err(SqlgenError::UnknownAction(other.to_string())),
        }
    }
}

/// Build the sqlc `-- name:` directive for a generated statement.
pub fn sqlc_comment(dialect: Dialect, sql: &str, action: Action) -> SqlgenResult<String> {
    let table = extract_table_name(sql)?;
    let name = snake_to_pascal(&singularize(&table));

    let comment = match action {
        Action::Create => format!(
            "-- name: Create{name} {}",
            dialect.strategy().create_cardinality().as_str()
        ),
        Action::Read => format!("-- name: Get{name}ByPk {}", Cardinality::One.as_str()),
    };
    Ok(comment)
}
