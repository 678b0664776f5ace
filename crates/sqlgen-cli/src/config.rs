use crate::cli::GenerateArgs;
use serde::Deserialize;
use sqlgen::{ConnectionDescriptor, Dialect, SqlgenError};
use std::path::Path;

/// Optional `sqlgen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub dsn: Option<String>,
    pub schema: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    #[serde(default)]
    pub sqlc: bool,
    #[serde(default)]
    pub skip_tables: Vec<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read config file {}: {e}", path.display())
        })?;

        Self::parse(&raw, |key| std::env::var(key).ok())
            .map_err(|e| anyhow::anyhow!("failed to load config file {}: {e}", path.display()))
    }

    pub fn parse(raw: &str, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.expand_env(&lookup)?;
        Ok(file)
    }

    fn expand_env(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(dsn) = self.database.dsn.as_mut() {
            *dsn = expand_env_vars(dsn, lookup)?;
        }
        if let Some(schema) = self.database.schema.as_mut() {
            *schema = expand_env_vars(schema, lookup)?;
        }
        for t in &mut self.generate.skip_tables {
            *t = expand_env_vars(t, lookup)?;
        }
        Ok(())
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dialect: Dialect,
    pub dsn: String,
    pub schema: Option<String>,
    pub sqlc: bool,
    pub skip_tables: Vec<String>,
}

impl Settings {
    /// Merge command-line flags over the config file (if any).
    pub fn resolve(dialect: Dialect, args: &GenerateArgs) -> anyhow::Result<Self> {
        let file = if args.config.exists() {
            ConfigFile::load(&args.config)?
        } else if args.config_explicit {
            anyhow::bail!("config file not found: {}", args.config.display());
        } else {
            ConfigFile::default()
        };
        Self::merge(dialect, args, file)
    }

    pub fn merge(dialect: Dialect, args: &GenerateArgs, file: ConfigFile) -> anyhow::Result<Self> {
        let dsn = args
            .dsn
            .clone()
            .or(file.database.dsn)
            .filter(|d| !d.trim().is_empty());
        let Some(dsn) = dsn else {
            anyhow::bail!("--dsn is required (or set database.dsn in the config file)");
        };

        let schema = args
            .schema
            .clone()
            .or(file.database.schema)
            .filter(|s| !s.trim().is_empty());

        let mut skip_tables = args
            .skip_tables
            .clone()
            .unwrap_or(file.generate.skip_tables);
        skip_tables.retain(|t| !t.trim().is_empty());
        skip_tables.sort();
        skip_tables.dedup();

        Ok(Self {
            dialect,
            dsn,
            schema,
            sqlc: args.sqlc || file.generate.sqlc,
            skip_tables,
        })
    }

    /// The schema whose tables are generated.
    ///
    /// MySQL defaults to the database named in the DSN, PostgreSQL to `public`.
    pub fn target_schema(&self, descriptor: &ConnectionDescriptor) -> anyhow::Result<String> {
        if let Some(schema) = &self.schema {
            return Ok(schema.clone());
        }
        match self.dialect {
            Dialect::MySql => descriptor.database.clone().ok_or_else(|| {
                anyhow::Error::from(SqlgenError::Config(
                    "the DSN names no database; pass --schema to pick one".to_string(),
                ))
            }),
            Dialect::Postgres => Ok("public".to_string()),
        }
    }
}

/// Replace every `${VAR}` with `lookup(VAR)`; a bare `$` is kept.
fn expand_env_vars(
    input: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let reference = &rest[start + 2..];
        let Some(end) = reference.find('}') else {
            anyhow::bail!("unterminated env var reference: ${{{reference}");
        };
        let key = &reference[..end];
        if key.is_empty() {
            anyhow::bail!("invalid env var reference: ${{}}");
        }
        let value = lookup(key)
            .ok_or_else(|| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
        out.push_str(&value);
        rest = &reference[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}
