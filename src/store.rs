use crate::activity::{Activity, ActivityFields, next_free_id};
use chrono::Utc;
use tracing::debug;

/// The in-memory activity list. Every mutation of the planner goes through
/// here; geometry is always derived from [`Schedule::activities`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    activities: Vec<Activity>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_activities(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    /// Appends a new activity stamped with the current time as its id.
    ///
    /// Returns `None` and leaves the list untouched when `name` is blank.
    pub fn add(
        &mut self,
        name: &str,
        start_time: u32,
        duration: u32,
        color: &str,
    ) -> Option<Activity> {
        self.add_at(
            ActivityFields::new(name, start_time, duration, color),
            Utc::now().timestamp_millis(),
        )
    }

    /// Same as [`Schedule::add`] with an explicit clock reading in
    /// milliseconds. Ids never repeat: when the clock has not moved past the
    /// largest existing id, the new id is that id plus one.
    pub fn add_at(&mut self, fields: ActivityFields, now_millis: i64) -> Option<Activity> {
        if fields.name.trim().is_empty() {
            debug!("ignoring activity with empty name");
            return None;
        }
        let id = match self.max_id() {
            Some(max) if now_millis <= max => {
                next_free_id(max, |id| self.activities.iter().any(|activity| activity.id == id))
            }
            _ => now_millis,
        };
        let mut activity = Activity::new(id, "", 0, 0, "");
        activity.apply_fields(fields);
        debug!(id, name = %activity.name, start = activity.start_time, duration = activity.duration, "added activity");
        self.activities.push(activity.clone());
        Some(activity)
    }

    /// Replaces the editable fields of the activity with `id`, keeping the id.
    /// Returns `false` when no such activity exists or `fields.name` is blank.
    pub fn update(&mut self, id: i64, fields: ActivityFields) -> bool {
        if fields.name.trim().is_empty() {
            debug!(id, "ignoring update with empty name");
            return false;
        }
        match self.activities.iter_mut().find(|activity| activity.id == id) {
            Some(activity) => {
                activity.apply_fields(fields);
                debug!(id, "updated activity");
                true
            }
            None => {
                debug!(id, "update ignored, activity not found");
                false
            }
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.activities.len();
        self.activities.retain(|activity| activity.id != id);
        let removed = self.activities.len() != before;
        if removed {
            debug!(id, "removed activity");
        }
        removed
    }

    /// Swaps in a whole new list, as import and sample loading do.
    pub fn replace(&mut self, activities: Vec<Activity>) {
        debug!(count = activities.len(), "replacing activity list");
        self.activities = activities;
    }

    pub fn load_sample(&mut self) {
        self.replace(sample_activities());
    }

    /// Activities ordered by start slot; ties keep list order.
    pub fn sorted_by_start(&self) -> Vec<Activity> {
        let mut sorted = self.activities.clone();
        sorted.sort_by_key(|activity| activity.start_time);
        sorted
    }

    fn max_id(&self) -> Option<i64> {
        self.activities.iter().map(|activity| activity.id).max()
    }
}

/// Demonstration day: six activities from 07:00 to 20:30.
pub fn sample_activities() -> Vec<Activity> {
    vec![
        Activity::new(1, "Morning Workout", 14, 2, "#10B981"),
        Activity::new(2, "Work - Focus Time", 18, 8, "#3B82F6"),
        Activity::new(3, "Lunch Break", 26, 2, "#F59E0B"),
        Activity::new(4, "Meetings", 28, 4, "#EF4444"),
        Activity::new(5, "Evening Walk", 36, 2, "#84CC16"),
        Activity::new(6, "Dinner & Family", 38, 3, "#EC4899"),
    ]
}
