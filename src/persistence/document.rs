use super::{ImportError, validate_entry};
use crate::activity::{Activity, next_free_id};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// The JSON envelope written by export and read back by import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    pub date: NaiveDate,
    pub day_name: String,
    pub activities: Vec<Activity>,
    pub exported_at: DateTime<Utc>,
    pub total_activities: usize,
}

impl ScheduleDocument {
    pub fn filename(&self) -> String {
        export_filename(self.date)
    }
}

/// Snapshot of `activities` stamped with the calendar date of `now`.
pub fn export_document<Tz: TimeZone>(activities: &[Activity], now: &DateTime<Tz>) -> ScheduleDocument {
    let date = now.date_naive();
    ScheduleDocument {
        date,
        day_name: date.format("%A").to_string(),
        activities: activities.to_vec(),
        exported_at: now.with_timezone(&Utc),
        total_activities: activities.len(),
    }
}

/// `schedule-YYYY-MM-DD-<weekday>.json`, weekday in lowercase.
pub fn export_filename(date: NaiveDate) -> String {
    format!(
        "schedule-{}-{}.json",
        date.format("%Y-%m-%d"),
        date.format("%A").to_string().to_lowercase()
    )
}

pub fn document_to_json(document: &ScheduleDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSchedule {
    /// Date recorded in the file, when it carried a readable one.
    pub date: Option<NaiveDate>,
    pub activities: Vec<Activity>,
    /// Entries skipped because they failed validation.
    pub dropped: usize,
}

/// Parses a schedule file and returns the activities that pass validation.
pub fn import_document(raw: &str) -> Result<Vec<Activity>, ImportError> {
    import_schedule(raw).map(|imported| imported.activities)
}

/// Like [`import_document`] but keeps the file's date and the number of
/// rejected entries.
///
/// Invalid entries are skipped, not fatal. Entries without a usable id, or
/// reusing one already taken, are given a fresh id above every id in the file,
/// or the smallest unused positive id when the file already uses `i64::MAX`.
#[instrument(skip(raw), fields(bytes = raw.len()))]
pub fn import_schedule(raw: &str) -> Result<ImportedSchedule, ImportError> {
    let root: Value = serde_json::from_str(raw).map_err(ImportError::Parse)?;
    let object = root
        .as_object()
        .ok_or_else(|| ImportError::Format("expected a JSON object".into()))?;
    let entries = match object.get("activities") {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(ImportError::Format("`activities` is not a list".into())),
        None => return Err(ImportError::Format("missing `activities`".into())),
    };

    let mut validated = Vec::with_capacity(entries.len());
    let mut dropped = 0;
    for (index, entry) in entries.iter().enumerate() {
        match validate_entry(entry) {
            Ok(entry) => validated.push(entry),
            Err(reason) => {
                dropped += 1;
                warn!(index, %reason, "skipping invalid activity");
            }
        }
    }

    if validated.is_empty() {
        return Err(ImportError::Empty);
    }

    // Explicit ids win on first occurrence; the rest get fresh ones.
    let mut taken = HashSet::with_capacity(validated.len());
    let keeps_id: Vec<bool> = validated
        .iter()
        .map(|entry| entry.id.is_some_and(|id| taken.insert(id)))
        .collect();
    let mut last_id = taken.iter().copied().max().unwrap_or(0).max(0);
    let mut activities = Vec::with_capacity(validated.len());
    for (entry, keeps_id) in validated.into_iter().zip(keeps_id) {
        let id = match entry.id {
            Some(id) if keeps_id => id,
            _ => {
                let id = next_free_id(last_id, |id| taken.contains(&id));
                taken.insert(id);
                last_id = id;
                id
            }
        };
        let mut activity = Activity::new(id, "", 0, 0, "");
        activity.apply_fields(entry.fields);
        activities.push(activity);
    }

    let date = object
        .get("date")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

    info!(count = activities.len(), dropped, "imported schedule");
    Ok(ImportedSchedule {
        date,
        activities,
        dropped,
    })
}
