use watch_planner::{Activity, ActivityFields, Schedule};

#[test]
fn add_rejects_blank_names() {
    let mut schedule = Schedule::new();
    assert!(schedule.add("", 0, 1, "#fff").is_none());
    assert!(schedule.add("   ", 0, 1, "#fff").is_none());
    assert!(schedule.is_empty());
}

#[test]
fn add_appends_with_timestamp_id() {
    let mut schedule = Schedule::new();
    let before = chrono::Utc::now().timestamp_millis();
    let activity = schedule.add("Read", 40, 2, "#8B5CF6").unwrap();
    assert!(activity.id >= before);
    assert_eq!(schedule.activities(), &[activity]);
}

#[test]
fn ids_stay_unique_when_clock_does_not_advance() {
    let mut schedule = Schedule::new();
    let a = schedule.add_at(ActivityFields::new("A", 0, 1, "#fff"), 1_000).unwrap();
    let b = schedule.add_at(ActivityFields::new("B", 2, 1, "#fff"), 1_000).unwrap();
    let c = schedule.add_at(ActivityFields::new("C", 4, 1, "#fff"), 900).unwrap();
    assert_eq!(a.id, 1_000);
    assert_eq!(b.id, 1_001);
    assert_eq!(c.id, 1_002);
}

#[test]
fn add_after_largest_possible_id_picks_a_free_one() {
    let mut schedule = Schedule::from_activities(vec![
        Activity::new(i64::MAX, "Imported", 0, 1, "#fff"),
        Activity::new(1, "Also imported", 2, 1, "#fff"),
    ]);
    let b = schedule.add("B", 0, 1, "#fff").unwrap();
    let c = schedule.add("C", 4, 1, "#fff").unwrap();
    assert_eq!(b.id, 2);
    assert_eq!(c.id, 3);
    assert_eq!(schedule.len(), 4);
}

#[test]
fn update_rejects_blank_names() {
    let mut schedule = Schedule::new();
    schedule.load_sample();
    assert!(!schedule.update(1, ActivityFields::new(" ", 0, 1, "#fff")));
    assert_eq!(schedule.find(1).unwrap().name, "Morning Workout");
}

#[test]
fn update_replaces_fields_and_keeps_id() {
    let mut schedule = Schedule::new();
    let original = schedule.add_at(ActivityFields::new("Gym", 14, 2, "#10B981"), 5).unwrap();

    assert!(schedule.update(5, ActivityFields::new("Run", 12, 3, "#EF4444")));
    let updated = schedule.find(5).unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.name, "Run");
    assert_eq!(updated.start_time, 12);
    assert_eq!(updated.duration, 3);
    assert_eq!(updated.color, "#EF4444");
}

#[test]
fn update_and_remove_unknown_ids_are_no_ops() {
    let mut schedule = Schedule::new();
    schedule.load_sample();
    let before = schedule.clone();
    assert!(!schedule.update(99, ActivityFields::new("X", 0, 1, "#fff")));
    assert!(!schedule.remove(99));
    assert_eq!(schedule, before);
}

#[test]
fn remove_filters_matching_activity() {
    let mut schedule = Schedule::new();
    schedule.load_sample();
    assert!(schedule.remove(3));
    assert_eq!(schedule.len(), 5);
    assert!(schedule.find(3).is_none());
}

#[test]
fn overlapping_activities_are_allowed() {
    let mut schedule = Schedule::new();
    schedule.add_at(ActivityFields::new("A", 10, 4, "#fff"), 1).unwrap();
    schedule.add_at(ActivityFields::new("B", 11, 4, "#fff"), 2).unwrap();
    assert_eq!(schedule.len(), 2);
}

#[test]
fn sample_spans_slot_14_through_41() {
    let mut schedule = Schedule::new();
    schedule.add("Old", 0, 1, "#fff").unwrap();
    schedule.load_sample();

    assert_eq!(schedule.len(), 6);
    let first = schedule.activities().iter().map(|a| a.start_time).min();
    let last = schedule.activities().iter().map(|a| a.end_slot()).max();
    assert_eq!(first, Some(14));
    assert_eq!(last, Some(41));
    assert!(schedule.activities().iter().all(|a| a.name != "Old"));
}

#[test]
fn sorted_view_leaves_storage_order_alone() {
    let mut schedule = Schedule::new();
    schedule.add_at(ActivityFields::new("Late", 40, 1, "#fff"), 1).unwrap();
    schedule.add_at(ActivityFields::new("Early", 2, 1, "#fff"), 2).unwrap();

    let sorted: Vec<_> = schedule.sorted_by_start().into_iter().map(|a| a.name).collect();
    assert_eq!(sorted, vec!["Early", "Late"]);
    assert_eq!(schedule.activities()[0].name, "Late");
}
