use crate::activity::Activity;
use crate::config::FaceGeometry;
use crate::layout::{self, TextAnchor, coord};
use kurbo::Point;
use std::fmt::Write as _;

const RIM_STROKE: &str = "#1F2937";
const DISC_FILL: &str = "#111827";
const MARKER_STROKE: &str = "#374151";
const LABEL_FILL: &str = "#E5E7EB";
const HAND_COLOR: &str = "#EF4444";

/// Declarative description of one thing the renderer draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: Point,
        radius: f64,
        fill: Option<String>,
        stroke: Option<String>,
        stroke_width: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: String,
        stroke_width: f64,
    },
    /// A ring segment; `activity_id` routes pointer events back to the store.
    Path {
        activity_id: i64,
        d: String,
        fill: String,
    },
    Text {
        position: Point,
        content: String,
        anchor: TextAnchor,
        fill: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneOptions {
    pub show_labels: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    geometry: FaceGeometry,
    shapes: Vec<Shape>,
    segments: Vec<Activity>,
}

impl Scene {
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn segment_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Path { .. }))
            .count()
    }

    /// Topmost activity under `point`. Later segments paint over earlier
    /// ones, so the search runs back to front.
    pub fn hit_test(&self, point: Point) -> Option<i64> {
        self.segments
            .iter()
            .rev()
            .find(|activity| layout::segment_contains(activity, point, &self.geometry))
            .map(|activity| activity.id)
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = coord(self.geometry.width),
            h = coord(self.geometry.height),
        );
        for shape in &self.shapes {
            out.push_str("  ");
            write_shape(&mut out, shape);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Circle {
            center,
            radius,
            fill,
            stroke,
            stroke_width,
        } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}""#,
                coord(center.x),
                coord(center.y),
                coord(*radius),
                escape(fill.as_deref().unwrap_or("none")),
            );
            if let Some(stroke) = stroke {
                let _ = write!(
                    out,
                    r#" stroke="{}" stroke-width="{}""#,
                    escape(stroke),
                    coord(*stroke_width)
                );
            }
            out.push_str(" />");
        }
        Shape::Line {
            from,
            to,
            stroke,
            stroke_width,
        } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" />"#,
                coord(from.x),
                coord(from.y),
                coord(to.x),
                coord(to.y),
                escape(stroke),
                coord(*stroke_width),
            );
        }
        Shape::Path {
            activity_id,
            d,
            fill,
        } => {
            let _ = write!(
                out,
                r#"<path data-activity-id="{activity_id}" d="{d}" fill="{}" stroke="{RIM_STROKE}" stroke-width="1" />"#,
                escape(fill),
            );
        }
        Shape::Text {
            position,
            content,
            anchor,
            fill,
        } => {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" text-anchor="{}" dominant-baseline="middle" fill="{}" font-size="11">{}</text>"#,
                coord(position.x),
                coord(position.y),
                anchor.as_str(),
                escape(fill),
                escape(content),
            );
        }
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Builds the full watch face for the current activity list.
///
/// Segments are emitted in list order so overlapping activities stack with
/// the later one on top. Zero-length activities are skipped.
pub fn build_scene(activities: &[Activity], geometry: &FaceGeometry, options: SceneOptions) -> Scene {
    let center = geometry.center();
    let mut shapes = Vec::new();

    shapes.push(Shape::Circle {
        center,
        radius: geometry.rim_radius,
        fill: None,
        stroke: Some(RIM_STROKE.to_string()),
        stroke_width: 2.0,
    });
    shapes.push(Shape::Circle {
        center,
        radius: geometry.disc_radius,
        fill: Some(DISC_FILL.to_string()),
        stroke: Some(MARKER_STROKE.to_string()),
        stroke_width: 1.0,
    });

    for marker in layout::hour_markers(geometry) {
        shapes.push(Shape::Line {
            from: marker.tick_outer,
            to: marker.tick_inner,
            stroke: MARKER_STROKE.to_string(),
            stroke_width: 2.0,
        });
        shapes.push(Shape::Text {
            position: marker.label,
            content: marker.hour.to_string(),
            anchor: TextAnchor::Middle,
            fill: MARKER_STROKE.to_string(),
        });
    }

    let drawn: Vec<Activity> = activities
        .iter()
        .filter(|activity| activity.duration > 0)
        .cloned()
        .collect();

    for activity in &drawn {
        shapes.push(Shape::Path {
            activity_id: activity.id,
            d: layout::path_for_segment(
                activity.start_time,
                activity.duration,
                geometry.outer_radius,
                geometry.inner_radius,
                center,
            ),
            fill: activity.color.clone(),
        });
    }

    if options.show_labels {
        for (index, activity) in drawn.iter().enumerate() {
            let placement = layout::label_position(activity, index, &drawn, geometry);
            shapes.push(Shape::Line {
                from: placement.connector(),
                to: placement.label(),
                stroke: activity.color.clone(),
                stroke_width: 1.0,
            });
            shapes.push(Shape::Text {
                position: placement.label(),
                content: activity.name.clone(),
                anchor: placement.anchor,
                fill: LABEL_FILL.to_string(),
            });
        }
    }

    shapes.push(Shape::Circle {
        center,
        radius: 4.0,
        fill: Some(HAND_COLOR.to_string()),
        stroke: None,
        stroke_width: 0.0,
    });
    let hand_tip = Point::new(center.x, center.y - geometry.disc_radius - 25.0);
    shapes.push(Shape::Line {
        from: center,
        to: hand_tip,
        stroke: HAND_COLOR.to_string(),
        stroke_width: 3.0,
    });
    shapes.push(Shape::Circle {
        center: hand_tip,
        radius: 6.0,
        fill: Some(HAND_COLOR.to_string()),
        stroke: None,
        stroke_width: 0.0,
    });

    Scene {
        geometry: geometry.clone(),
        shapes,
        segments: drawn,
    }
}
