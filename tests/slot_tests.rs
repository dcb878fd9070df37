use watch_planner::slot::{
    MAX_DURATION_SLOTS, duration_options, format_duration, slot_span_label, slot_to_time,
    start_time_options,
};

#[test]
fn slot_to_time_covers_day_boundaries() {
    assert_eq!(slot_to_time(0), "00:00");
    assert_eq!(slot_to_time(1), "00:30");
    assert_eq!(slot_to_time(14), "07:00");
    assert_eq!(slot_to_time(47), "23:30");
}

#[test]
fn slot_to_time_wraps_after_midnight() {
    assert_eq!(slot_to_time(48), "00:00");
    assert_eq!(slot_to_time(51), "01:30");
    assert_eq!(slot_to_time(96), "00:00");
}

#[test]
fn format_duration_matches_form_labels() {
    assert_eq!(format_duration(1), "30m");
    assert_eq!(format_duration(2), "1h");
    assert_eq!(format_duration(3), "1h 30m");
    assert_eq!(format_duration(16), "8h");
}

#[test]
fn span_label_uses_exclusive_end() {
    assert_eq!(slot_span_label(14, 2), "07:00 - 08:00");
    assert_eq!(slot_span_label(38, 3), "19:00 - 20:30");
}

#[test]
fn duration_selector_never_offers_less_than_one_block() {
    let options = duration_options();
    assert_eq!(options.len(), MAX_DURATION_SLOTS as usize);
    assert_eq!(options.first().unwrap().0, 1);
    assert_eq!(options.last().unwrap().0, 16);
    assert!(options.iter().all(|(blocks, _)| *blocks >= 1));
    assert_eq!(options[0].1, "1 block (0.5h)");
    assert_eq!(options[2].1, "3 blocks (1.5h)");
    assert_eq!(options[3].1, "4 blocks (2h)");
}

#[test]
fn start_selector_lists_every_slot() {
    let options = start_time_options();
    assert_eq!(options.len(), 48);
    assert_eq!(options[0], (0, "00:00".to_string()));
    assert_eq!(options[47], (47, "23:30".to_string()));
}
