use crate::activity::Activity;
use crate::slot::{format_duration, slot_to_time};
use polars::prelude::*;

/// Agenda view of the schedule: one row per activity, earliest start first.
pub fn agenda_frame(activities: &[Activity]) -> PolarsResult<DataFrame> {
    let mut sorted: Vec<&Activity> = activities.iter().collect();
    sorted.sort_by_key(|activity| activity.start_time);

    let ids: Vec<i64> = sorted.iter().map(|a| a.id).collect();
    let names: Vec<&str> = sorted.iter().map(|a| a.name.as_str()).collect();
    let starts: Vec<String> = sorted.iter().map(|a| slot_to_time(a.start_time)).collect();
    let ends: Vec<String> = sorted.iter().map(|a| slot_to_time(a.end_slot())).collect();
    let durations: Vec<String> = sorted.iter().map(|a| format_duration(a.duration)).collect();
    let colors: Vec<&str> = sorted.iter().map(|a| a.color.as_str()).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("start"), starts).into_column(),
        Series::new(PlSmallStr::from_static("end"), ends).into_column(),
        Series::new(PlSmallStr::from_static("duration"), durations).into_column(),
        Series::new(PlSmallStr::from_static("color"), colors).into_column(),
    ])
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        _ => av.to_string(),
    }
}

/// Draws `df` as a boxed ASCII table.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        rows.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        out.push_str(&" ".repeat(pad));
        out.push_str(" |");
    }
    out.push('\n');
}
