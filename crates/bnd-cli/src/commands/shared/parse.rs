use std::path::PathBuf;

use anyhow::Context;
use bnd_core::{SessionName, SubjectId};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_subject(raw: &str) -> anyhow::Result<SubjectId> {
    SubjectId::parse(raw).with_context(|| format!("invalid subject '{raw}'"))
}

/// A session name with the subject taken from its own prefix.
pub fn parse_session(raw: &str) -> anyhow::Result<SessionName> {
    SessionName::parse_inferred(raw).with_context(|| format!("invalid session '{raw}'"))
}

/// `YYYY-MM-DD`, or the local date when absent.
pub fn parse_day(raw: Option<&str>) -> anyhow::Result<NaiveDate> {
    raw.map_or_else(
        || Ok(chrono::Local::now().date_naive()),
        |value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
        },
    )
}

/// Absolute form of a path argument; relative paths resolve against the
/// current directory.
pub fn absolute_path(raw: &str) -> anyhow::Result<PathBuf> {
    std::path::absolute(raw).with_context(|| format!("invalid path '{raw}'"))
}
