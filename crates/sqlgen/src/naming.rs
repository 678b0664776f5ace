//! Name helpers used to label generated statements.

use crate::error::{SqlgenError, SqlgenResult};
use heck::ToUpperCamelCase;
use regex::Regex;
use std::sync::OnceLock;

fn insert_target_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bINSERT\s+INTO\s+([^\s(),;]+)").expect("invalid built-in insert regex")
    })
}

fn from_target_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bFROM\s+([^\s(),;]+)").expect("invalid built-in from regex")
    })
}

/// Extract the target table from a generated `INSERT` or `SELECT` statement.
///
/// The token after `INSERT INTO` wins; otherwise the token after `FROM` is used.
pub fn extract_table_name(sql: &str) -> SqlgenResult<String> {
    let sql = sql.trim();
    insert_target_re()
        .captures(sql)
        .or_else(|| from_target_re().captures(sql))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| SqlgenError::TableName(sql.to_string()))
}

/// `user_profile` -> `UserProfile`.
///
/// Each underscore-separated segment is title-cased, so `USER_ID` becomes
/// `UserId`.
pub fn snake_to_pascal(input: &str) -> String {
    input.to_lowercase().to_upper_camel_case()
}

/// Naive English singular, good enough for comment labels.
///
/// Irregular plurals are not handled: `categories` becomes `categorie`.
pub fn singularize(word: &str) -> String {
    const ES_ENDINGS: [&str; 5] = ["sses", "xes", "zes", "ches", "shes"];
    const KEEP_ENDINGS: [&str; 3] = ["ss", "us", "is"];

    let lower = word.to_ascii_lowercase();
    if ES_ENDINGS.iter().any(|end| lower.ends_with(end)) {
        return word[..word.len() - 2].to_string();
    }
    if KEEP_ENDINGS.iter().any(|end| lower.ends_with(end)) {
        return word.to_string();
    }
    match word.strip_suffix(['s', 'S']) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}
