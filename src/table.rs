//! Structured external opening table.
//!
//! The file is a JSON object mapping a whitespace-joined move line to a
//! `[code, name]` pair:
//!
//! ```json
//! { "e4 e5 Nf3 Nc6 Bb5": ["C60", "Ruy Lopez"] }
//! ```

use crate::error::{EntryDiagnostics, EntryError, SourceError};
use crate::moves::canonicalize;
use crate::sources::LoadedEntries;
use crate::types::{MoveSequence, OpeningRecord};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub fn load_json_table(path: &Path) -> Result<LoadedEntries, SourceError> {
    let label = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => SourceError::malformed(&label, format!("not UTF-8: {e}")),
        _ => SourceError::unavailable(&label, format!("Failed to read file: {e}")),
    })?;
    parse_json_table(&text, &label)
}

pub(crate) fn parse_json_table(text: &str, label: &str) -> Result<LoadedEntries, SourceError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SourceError::malformed(label, format!("invalid JSON: {e}")))?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(SourceError::malformed(
                label,
                format!("expected a JSON object at top level, found {}", json_kind(&other)),
            ));
        }
    };

    let mut entries = Vec::with_capacity(map.len());
    let mut skipped = EntryDiagnostics::default();

    for (raw_key, raw_value) in &map {
        match parse_entry(raw_key, raw_value) {
            Ok(entry) => entries.push(entry),
            Err(reason) => skipped.push(EntryError::new(format!("key '{raw_key}'"), reason)),
        }
    }

    Ok(LoadedEntries { entries, skipped })
}

fn parse_entry(raw_key: &str, raw_value: &Value) -> Result<(MoveSequence, OpeningRecord), String> {
    let record = match raw_value {
        Value::Array(items) if items.len() == 2 => match (&items[0], &items[1]) {
            (Value::String(code), Value::String(name)) => OpeningRecord::validated(code, name)?,
            _ => return Err("expected [code, name] strings".to_string()),
        },
        other => {
            return Err(format!(
                "expected a two-element [code, name] array, found {}",
                json_kind(other)
            ));
        }
    };

    let tokens = MoveSequence::parse(raw_key);
    if tokens.is_empty() {
        return Err("empty move line".to_string());
    }
    let line = canonicalize(&tokens).map_err(|e| format!("illegal line: {e}"))?;

    Ok((line, record))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
