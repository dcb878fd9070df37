use serde::{Deserialize, Serialize};

/// Default colour choices offered by the add/edit form.
pub const PALETTE: [&str; 10] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
    "#F97316", "#6366F1",
];

/// One named block of time on the watch face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub name: String,
    /// First slot covered, `0..48`.
    pub start_time: u32,
    /// Length in slots.
    pub duration: u32,
    pub color: String,
}

impl Activity {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        start_time: u32,
        duration: u32,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_time,
            duration,
            color: color.into(),
        }
    }

    /// Exclusive end slot. May run past 48 for segments crossing midnight.
    pub fn end_slot(&self) -> u32 {
        self.start_time.saturating_add(self.duration)
    }

    /// Midpoint used to place the label, in (fractional) slots.
    pub fn mid_slot(&self) -> f64 {
        self.start_time as f64 + self.duration as f64 / 2.0
    }

    pub fn fields(&self) -> ActivityFields {
        ActivityFields {
            name: self.name.clone(),
            start_time: self.start_time,
            duration: self.duration,
            color: self.color.clone(),
        }
    }

    pub(crate) fn apply_fields(&mut self, fields: ActivityFields) {
        self.name = fields.name;
        self.start_time = fields.start_time;
        self.duration = fields.duration;
        self.color = fields.color;
    }
}

/// The user-editable part of an [`Activity`]; everything except the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFields {
    pub name: String,
    pub start_time: u32,
    pub duration: u32,
    pub color: String,
}

impl ActivityFields {
    pub fn new(name: impl Into<String>, start_time: u32, duration: u32, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_time,
            duration,
            color: color.into(),
        }
    }
}

impl Default for ActivityFields {
    fn default() -> Self {
        Self::new("", 0, 1, PALETTE[0])
    }
}

/// Colour suggested for the next new activity given the current list length.
pub fn palette_color_for(count: usize, palette: &[String]) -> String {
    if palette.is_empty() {
        return PALETTE[count % PALETTE.len()].to_string();
    }
    palette[count % palette.len()].clone()
}

/// First id above `after` that `is_taken` rejects. Once the id space above
/// `after` runs out, the smallest free positive id is used instead.
pub(crate) fn next_free_id(after: i64, is_taken: impl Fn(i64) -> bool) -> i64 {
    let mut candidate = after;
    while let Some(next) = candidate.checked_add(1) {
        if !is_taken(next) {
            return next;
        }
        candidate = next;
    }
    (1..=i64::MAX).find(|id| !is_taken(*id)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let activity = Activity::new(7, "Lunch", 26, 2, "#F59E0B");
        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["startTime"], 26);
        assert_eq!(value["duration"], 2);
        assert!(value.get("start_time").is_none());
    }

    #[test]
    fn palette_cycles() {
        let palette: Vec<String> = PALETTE.iter().map(|c| c.to_string()).collect();
        assert_eq!(palette_color_for(0, &palette), "#3B82F6");
        assert_eq!(palette_color_for(11, &palette), "#EF4444");
        assert_eq!(palette_color_for(3, &[]), "#F59E0B");
    }

    #[test]
    fn next_free_id_skips_taken_and_falls_back_at_the_top() {
        assert_eq!(next_free_id(4, |id| id == 5 || id == 6), 7);
        assert_eq!(next_free_id(i64::MAX, |id| id == 1), 2);
        assert_eq!(next_free_id(i64::MAX - 1, |id| id == i64::MAX), 1);
    }
}
