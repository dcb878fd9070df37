//! Half-hour slot arithmetic shared by the watch face, the forms and the CLI.

/// Number of 30-minute slots in one day.
pub const SLOTS_PER_DAY: u32 = 48;

/// Longest duration the duration selector offers, in slots.
pub const MAX_DURATION_SLOTS: u32 = 16;

/// Formats a slot as a 24-hour clock time. Slots past the end of the day
/// wrap around, so `48` renders as `00:00` again.
pub fn slot_to_time(slot: u32) -> String {
    let hours = (slot / 2) % 24;
    let minutes = (slot % 2) * 30;
    format!("{hours:02}:{minutes:02}")
}

/// Human readable duration such as `1h 30m`, `2h` or `30m`.
pub fn format_duration(slots: u32) -> String {
    let hours = slots / 2;
    let minutes = (slots % 2) * 30;
    if hours > 0 && minutes > 0 {
        format!("{hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h")
    } else {
        format!("{minutes}m")
    }
}

/// `HH:MM - HH:MM` for an activity starting at `start` and lasting `duration` slots.
pub fn slot_span_label(start: u32, duration: u32) -> String {
    format!(
        "{} - {}",
        slot_to_time(start),
        slot_to_time(start.saturating_add(duration))
    )
}

/// Every selectable start time, one per slot of the day.
pub fn start_time_options() -> Vec<(u32, String)> {
    (0..SLOTS_PER_DAY).map(|slot| (slot, slot_to_time(slot))).collect()
}

/// Every selectable duration. The selector starts at one block, never zero.
pub fn duration_options() -> Vec<(u32, String)> {
    (1..=MAX_DURATION_SLOTS)
        .map(|blocks| {
            let plural = if blocks > 1 { "s" } else { "" };
            let hours = blocks as f64 * 0.5;
            (blocks, format!("{blocks} block{plural} ({hours}h)"))
        })
        .collect()
}

/// Parses either a bare slot number (`14`) or a clock time on a half-hour
/// boundary (`07:00`, `7:30`).
pub fn parse_clock(input: &str) -> Option<u32> {
    let input = input.trim();
    if let Some((h, m)) = input.split_once(':') {
        let hours: u32 = h.parse().ok()?;
        let minutes: u32 = m.parse().ok()?;
        if hours >= 24 || !(minutes == 0 || minutes == 30) {
            return None;
        }
        return Some(hours * 2 + minutes / 30);
    }
    let slot: u32 = input.parse().ok()?;
    (slot < SLOTS_PER_DAY).then_some(slot)
}
