pub mod document;
pub mod file;

pub use document::{
    ImportedSchedule, ScheduleDocument, document_to_json, export_document, export_filename,
    import_document, import_schedule,
};
pub use file::{
    load_activities_from_csv, load_document_from_path, save_activities_to_csv,
    save_document_to_dir,
};

use crate::activity::ActivityFields;
use serde_json::Value;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Why a schedule file could not be imported. Each variant maps to one
/// user-facing notice.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("error reading schedule file: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid schedule file format: {0}")]
    Format(String),
    #[error("no valid activities found in the schedule file")]
    Empty,
}

/// Reason a single imported entry was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntryRejection {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("missing or empty name")]
    MissingName,
    #[error("startTime is not a non-negative whole number")]
    InvalidStartTime,
    #[error("duration is not a non-negative whole number")]
    InvalidDuration,
    #[error("missing or empty color")]
    MissingColor,
}

/// An imported entry that passed validation. The id is kept only if the
/// file carried a usable one.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedEntry {
    pub id: Option<i64>,
    pub fields: ActivityFields,
}

/// Checks one raw `activities[]` element against the activity schema.
pub(crate) fn validate_entry(value: &Value) -> Result<ValidatedEntry, EntryRejection> {
    let object = value.as_object().ok_or(EntryRejection::NotAnObject)?;

    let name = non_empty_string(object.get("name")).ok_or(EntryRejection::MissingName)?;
    let start_time = slot_number(object.get("startTime")).ok_or(EntryRejection::InvalidStartTime)?;
    let duration = slot_number(object.get("duration")).ok_or(EntryRejection::InvalidDuration)?;
    let color = non_empty_string(object.get("color")).ok_or(EntryRejection::MissingColor)?;

    Ok(ValidatedEntry {
        id: object.get("id").and_then(whole_number),
        fields: ActivityFields::new(name, start_time, duration, color),
    })
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn slot_number(value: Option<&Value>) -> Option<u32> {
    let number = whole_number(value?)?;
    u32::try_from(number).ok()
}

// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let float = value.as_f64()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER {
        Some(float as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_integral_floats() {
        let entry = validate_entry(&json!({
            "name": "Nap", "startTime": 28.0, "duration": 2, "color": "#fff", "id": 5.0
        }))
        .unwrap();
        assert_eq!(entry.fields.start_time, 28);
        assert_eq!(entry.id, Some(5));
    }

    #[test]
    fn rejects_fractional_and_negative_slots() {
        let fractional = json!({"name": "A", "startTime": 1.5, "duration": 2, "color": "#fff"});
        assert_eq!(validate_entry(&fractional), Err(EntryRejection::InvalidStartTime));

        let negative = json!({"name": "A", "startTime": 1, "duration": -2, "color": "#fff"});
        assert_eq!(validate_entry(&negative), Err(EntryRejection::InvalidDuration));
    }

    #[test]
    fn rejects_numeric_strings() {
        let entry = json!({"name": "A", "startTime": "4", "duration": 2, "color": "#fff"});
        assert_eq!(validate_entry(&entry), Err(EntryRejection::InvalidStartTime));
    }

    #[test]
    fn rejects_non_string_name_and_empty_color() {
        let entry = json!({"name": 12, "startTime": 4, "duration": 2, "color": "#fff"});
        assert_eq!(validate_entry(&entry), Err(EntryRejection::MissingName));

        let entry = json!({"name": "A", "startTime": 4, "duration": 2, "color": ""});
        assert_eq!(validate_entry(&entry), Err(EntryRejection::MissingColor));
    }
}
