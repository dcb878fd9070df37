//! Geometry of the watch face: slots become angles, activities become ring
//! segments, and labels are pushed outside the ring with a connector line.
//!
//! Slot 0 sits at 12 o'clock and time runs clockwise. SVG's y axis points
//! down, so a plain `(cos, sin)` walk already turns clockwise on screen.

use crate::activity::Activity;
use crate::config::FaceGeometry;
use crate::slot::SLOTS_PER_DAY;
use kurbo::Point;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// `cos` threshold separating left/right labels from the ones near the
/// vertical axis.
const ANCHOR_THRESHOLD: f64 = 0.1;

/// Angle in radians of a (possibly fractional) slot.
pub fn slot_angle(slot: f64) -> f64 {
    (slot / SLOTS_PER_DAY as f64) * TAU - FRAC_PI_2
}

pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// SVG path for the ring segment covering `duration` slots from `start_slot`.
///
/// The path walks the outer arc clockwise, drops to the inner radius, walks
/// the inner arc back and closes. A zero duration collapses to a degenerate
/// zero-angle path, which callers should skip rather than draw.
pub fn path_for_segment(
    start_slot: u32,
    duration: u32,
    outer_radius: f64,
    inner_radius: f64,
    center: Point,
) -> String {
    let start_angle = slot_angle(start_slot as f64);
    let end_angle = slot_angle(start_slot as f64 + duration as f64);

    let p1 = point_on_circle(center, outer_radius, start_angle);
    let p2 = point_on_circle(center, outer_radius, end_angle);
    let p3 = point_on_circle(center, inner_radius, end_angle);
    let p4 = point_on_circle(center, inner_radius, start_angle);

    let large_arc = if end_angle - start_angle > PI { 1 } else { 0 };

    format!(
        "M {} {} A {} {} 0 {} 1 {} {} L {} {} A {} {} 0 {} 0 {} {} Z",
        coord(p1.x),
        coord(p1.y),
        coord(outer_radius),
        coord(outer_radius),
        large_arc,
        coord(p2.x),
        coord(p2.y),
        coord(p3.x),
        coord(p3.y),
        coord(inner_radius),
        coord(inner_radius),
        large_arc,
        coord(p4.x),
        coord(p4.y),
    )
}

/// Formats a coordinate rounded to six decimals, without trailing zeros and
/// never as `-0`.
pub(crate) fn coord(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }

    fn for_angle(angle: f64) -> Self {
        let cos = angle.cos();
        if cos > ANCHOR_THRESHOLD {
            TextAnchor::Start
        } else if cos < -ANCHOR_THRESHOLD {
            TextAnchor::End
        } else {
            TextAnchor::Middle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPlacement {
    pub label_x: f64,
    pub label_y: f64,
    pub connector_x: f64,
    pub connector_y: f64,
    pub anchor: TextAnchor,
}

impl LabelPlacement {
    pub fn label(&self) -> Point {
        Point::new(self.label_x, self.label_y)
    }

    pub fn connector(&self) -> Point {
        Point::new(self.connector_x, self.connector_y)
    }
}

/// Places the label of `activity` (at position `index` in `all_activities`)
/// outside the ring.
///
/// The connector touches the outer edge at the segment midpoint. With more
/// than one activity the label is rotated by `index * label_fan / count` to
/// spread neighbouring labels apart; this reduces overlap but does not rule
/// it out.
pub fn label_position(
    activity: &Activity,
    index: usize,
    all_activities: &[Activity],
    geometry: &FaceGeometry,
) -> LabelPlacement {
    let center = geometry.center();
    let mid_angle = slot_angle(activity.mid_slot());

    let count = all_activities.len();
    let fan_offset = if count > 1 {
        index as f64 * geometry.label_fan / count as f64
    } else {
        0.0
    };
    let label_angle = mid_angle + fan_offset;

    let connector = point_on_circle(center, geometry.outer_radius, mid_angle);
    let label = point_on_circle(center, geometry.label_radius, label_angle);

    LabelPlacement {
        label_x: label.x,
        label_y: label.y,
        connector_x: connector.x,
        connector_y: connector.y,
        anchor: TextAnchor::for_angle(label_angle),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourMarker {
    pub hour: u32,
    pub tick_outer: Point,
    pub tick_inner: Point,
    pub label: Point,
}

/// The 24 hour ticks around the rim, hour 0 at the top.
pub fn hour_markers(geometry: &FaceGeometry) -> Vec<HourMarker> {
    let center = geometry.center();
    (0..24)
        .map(|hour| {
            let angle = (hour as f64 / 24.0) * TAU - FRAC_PI_2;
            HourMarker {
                hour,
                tick_outer: point_on_circle(center, geometry.tick_outer_radius, angle),
                tick_inner: point_on_circle(center, geometry.tick_inner_radius, angle),
                label: point_on_circle(center, geometry.hour_label_radius, angle),
            }
        })
        .collect()
}

/// Fractional slot under a point, in `[0, 48)`.
pub fn slot_at_point(center: Point, point: Point) -> f64 {
    let offset = point - center;
    let angle = offset.y.atan2(offset.x) + FRAC_PI_2;
    let slot = angle / TAU * SLOTS_PER_DAY as f64;
    slot.rem_euclid(SLOTS_PER_DAY as f64)
}

/// Whether `point` falls inside the ring segment of `activity`.
pub fn segment_contains(activity: &Activity, point: Point, geometry: &FaceGeometry) -> bool {
    if activity.duration == 0 {
        return false;
    }
    let center = geometry.center();
    let distance = (point - center).hypot();
    if distance < geometry.inner_radius || distance > geometry.outer_radius {
        return false;
    }
    if activity.duration >= SLOTS_PER_DAY {
        return true;
    }
    let day = SLOTS_PER_DAY as f64;
    let slot = slot_at_point(center, point);
    let start = (activity.start_time % SLOTS_PER_DAY) as f64;
    let offset = (slot - start).rem_euclid(day);
    offset < activity.duration as f64
}
