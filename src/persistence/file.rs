use super::{
    ImportedSchedule, PersistenceError, PersistenceResult, document_to_json, export_document,
    import_schedule, validate_entry,
};
use crate::activity::Activity;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the export document for `activities` into `dir` under the
/// generated `schedule-<date>-<weekday>.json` name and returns the path.
pub fn save_document_to_dir<P: AsRef<Path>, Tz: TimeZone>(
    activities: &[Activity],
    dir: P,
    now: &DateTime<Tz>,
) -> PersistenceResult<PathBuf> {
    let document = export_document(activities, now);
    let path = dir.as_ref().join(document.filename());
    fs::write(&path, document_to_json(&document)?)?;
    info!(path = %path.display(), count = activities.len(), "exported schedule");
    Ok(path)
}

pub fn load_document_from_path<P: AsRef<Path>>(path: P) -> PersistenceResult<ImportedSchedule> {
    let raw = fs::read_to_string(path)?;
    Ok(import_schedule(&raw)?)
}

#[derive(Serialize, Deserialize)]
struct ActivityCsvRecord {
    id: i64,
    name: String,
    #[serde(rename = "startTime")]
    start_time: u32,
    duration: u32,
    color: String,
}

impl From<&Activity> for ActivityCsvRecord {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name.clone(),
            start_time: activity.start_time,
            duration: activity.duration,
            color: activity.color.clone(),
        }
    }
}

impl ActivityCsvRecord {
    fn into_activity(self) -> PersistenceResult<Activity> {
        let value = serde_json::json!({
            "id": self.id,
            "name": self.name,
            "startTime": self.start_time,
            "duration": self.duration,
            "color": self.color,
        });
        let entry = validate_entry(&value).map_err(|reason| {
            PersistenceError::InvalidData(format!("activity {}: {reason}", self.id))
        })?;
        let mut activity = Activity::new(self.id, "", 0, 0, "");
        activity.apply_fields(entry.fields);
        Ok(activity)
    }
}

pub fn save_activities_to_csv<P: AsRef<Path>>(
    activities: &[Activity],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for activity in activities {
        writer.serialize(ActivityCsvRecord::from(activity))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_activities_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Activity>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut activities = Vec::new();
    let mut seen_ids = HashSet::new();
    for record in reader.deserialize::<ActivityCsvRecord>() {
        let activity = record?.into_activity()?;
        if !seen_ids.insert(activity.id) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate activity id {}",
                activity.id
            )));
        }
        activities.push(activity);
    }

    if activities.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no activities".into(),
        ));
    }
    Ok(activities)
}
