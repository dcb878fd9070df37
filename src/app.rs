//! Application state for the planner view.
//!
//! All UI state lives in one owned [`AppState`]; every user interaction is
//! an [`Action`] fed through [`AppState::apply`], which mutates the state
//! synchronously and may hand back a [`Notice`] for the user.

use crate::activity::{Activity, ActivityFields, palette_color_for};
use crate::config::PlannerConfig;
use crate::persistence::{ImportError, ImportedSchedule};
use crate::slot::{format_duration, slot_span_label};
use crate::store::Schedule;
use chrono::NaiveDate;
use kurbo::{Point, Vec2};
use tracing::debug;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
const ZOOM_STEP: f64 = 1.1;
const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, -10.0);

/// Which form is on screen. An open edit takes precedence over the add form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Hidden,
    /// The add form is open and edits `AppState::new_draft`.
    Adding,
    Editing {
        id: i64,
        draft: ActivityFields,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub id: i64,
    pub draft: ActivityFields,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftChange {
    Name(String),
    StartTime(u32),
    Duration(u32),
    Color(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub activity_id: i64,
    pub pointer: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub name: String,
    pub span: String,
    pub duration: String,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { origin: Point, start_offset: Vec2 },
}

/// Position and zoom of the watch-face overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub offset: Vec2,
    pub zoom: f64,
    pub drag: DragState,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            drag: DragState::Idle,
        }
    }
}

impl HudState {
    fn pointer_down(&mut self, point: Point) {
        self.drag = DragState::Dragging {
            origin: point,
            start_offset: self.offset,
        };
    }

    fn pointer_move(&mut self, point: Point) {
        if let DragState::Dragging {
            origin,
            start_offset,
        } = self.drag
        {
            self.offset = start_offset + (point - origin);
        }
    }

    fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    fn wheel(&mut self, delta: f64) {
        let zoom = if delta < 0.0 {
            self.zoom * ZOOM_STEP
        } else if delta > 0.0 {
            self.zoom / ZOOM_STEP
        } else {
            self.zoom
        };
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[derive(Debug)]
pub enum Action {
    ToggleAddForm,
    ToggleFilePanel,
    EditDraft(DraftChange),
    Submit,
    CancelForm,
    /// Opens the edit form for an activity (also what a segment click does).
    StartEdit(i64),
    Delete(i64),
    LoadSample,
    /// Swaps in a list read from somewhere other than a schedule document.
    LoadActivities(Vec<Activity>),
    Imported(Result<ImportedSchedule, ImportError>),
    Exported(String),
    /// Checks there is something to save; the caller performs the export
    /// when no notice comes back.
    QuickSave,
    PointerEnter(i64, Point),
    PointerMove(Point),
    PointerLeave,
    PointerDown(Point),
    PointerUp,
    Wheel(f64),
}

/// User-facing feedback. None of these are fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Imported {
        count: usize,
        date: Option<NaiveDate>,
    },
    ReadFailed,
    InvalidFormat,
    NoValidActivities,
    Exported {
        filename: String,
    },
    NothingToSave,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Imported { count, date } => {
                let date = date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "Unknown date".to_string());
                format!(
                    "Schedule imported successfully! Original date: {date}. Activities loaded: {count}"
                )
            }
            Notice::ReadFailed => "Error reading schedule file. Please ensure it's a valid JSON file exported from this app.".to_string(),
            Notice::InvalidFormat => "Invalid schedule file format. Please select a valid schedule file.".to_string(),
            Notice::NoValidActivities => "No valid activities found in the schedule file.".to_string(),
            Notice::Exported { filename } => format!("Schedule saved as: {filename}"),
            Notice::NothingToSave => "No activities to save. Add some activities first!".to_string(),
        }
    }
}

impl From<&ImportError> for Notice {
    fn from(err: &ImportError) -> Self {
        match err {
            ImportError::Parse(_) => Notice::ReadFailed,
            ImportError::Format(_) => Notice::InvalidFormat,
            ImportError::Empty => Notice::NoValidActivities,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub schedule: Schedule,
    pub add_form_open: bool,
    pub editing: Option<EditForm>,
    /// Contents of the add form; survives closing and reopening it.
    pub new_draft: ActivityFields,
    pub file_panel_open: bool,
    pub hover: Option<Hover>,
    pub hud: HudState,
    palette: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}

impl AppState {
    pub fn new(config: &PlannerConfig) -> Self {
        let palette = config.palette.clone();
        let new_draft = ActivityFields {
            color: palette_color_for(0, &palette),
            ..ActivityFields::default()
        };
        Self {
            schedule: Schedule::new(),
            add_form_open: false,
            editing: None,
            new_draft,
            file_panel_open: false,
            hover: None,
            hud: HudState::default(),
            palette,
        }
    }

    pub fn apply(&mut self, action: Action) -> Option<Notice> {
        debug!(?action, "apply");
        match action {
            Action::ToggleAddForm => {
                self.add_form_open = !self.add_form_open;
                None
            }
            Action::ToggleFilePanel => {
                self.file_panel_open = !self.file_panel_open;
                None
            }
            Action::EditDraft(change) => {
                let draft = match &mut self.editing {
                    Some(edit) => &mut edit.draft,
                    None => &mut self.new_draft,
                };
                match change {
                    DraftChange::Name(name) => draft.name = name,
                    DraftChange::StartTime(slot) => draft.start_time = slot,
                    DraftChange::Duration(slots) => draft.duration = slots,
                    DraftChange::Color(color) => draft.color = color,
                }
                None
            }
            Action::Submit => {
                self.submit();
                None
            }
            Action::CancelForm => {
                self.editing = None;
                self.add_form_open = false;
                None
            }
            Action::StartEdit(id) => {
                if let Some(activity) = self.schedule.find(id) {
                    self.editing = Some(EditForm {
                        id,
                        draft: activity.fields(),
                    });
                }
                None
            }
            Action::Delete(id) => {
                self.schedule.remove(id);
                if self.editing.as_ref().is_some_and(|edit| edit.id == id) {
                    self.editing = None;
                }
                if self.hover.is_some_and(|hover| hover.activity_id == id) {
                    self.hover = None;
                }
                None
            }
            Action::LoadSample => {
                self.schedule.load_sample();
                self.after_list_replaced();
                None
            }
            Action::LoadActivities(activities) => {
                self.schedule.replace(activities);
                self.after_list_replaced();
                None
            }
            Action::Imported(result) => {
                self.file_panel_open = false;
                match result {
                    Ok(imported) => {
                        let count = imported.activities.len();
                        self.schedule.replace(imported.activities);
                        self.after_list_replaced();
                        Some(Notice::Imported {
                            count,
                            date: imported.date,
                        })
                    }
                    Err(err) => Some(Notice::from(&err)),
                }
            }
            Action::Exported(filename) => Some(Notice::Exported { filename }),
            Action::QuickSave => self.schedule.is_empty().then_some(Notice::NothingToSave),
            Action::PointerEnter(id, point) => {
                if self.schedule.find(id).is_some() {
                    self.hover = Some(Hover {
                        activity_id: id,
                        pointer: point,
                    });
                }
                None
            }
            Action::PointerMove(point) => {
                if let Some(hover) = self.hover.as_mut() {
                    hover.pointer = point;
                }
                self.hud.pointer_move(point);
                None
            }
            Action::PointerLeave => {
                self.hover = None;
                None
            }
            Action::PointerDown(point) => {
                self.hud.pointer_down(point);
                None
            }
            Action::PointerUp => {
                self.hud.pointer_up();
                None
            }
            Action::Wheel(delta) => {
                self.hud.wheel(delta);
                None
            }
        }
    }

    pub fn form(&self) -> FormState {
        match &self.editing {
            Some(edit) => FormState::Editing {
                id: edit.id,
                draft: edit.draft.clone(),
            },
            None if self.add_form_open => FormState::Adding,
            None => FormState::Hidden,
        }
    }

    /// Tooltip for the hovered activity, placed just off the pointer.
    pub fn tooltip(&self) -> Option<Tooltip> {
        let hover = self.hover?;
        let activity = self.schedule.find(hover.activity_id)?;
        Some(Tooltip {
            name: activity.name.clone(),
            span: slot_span_label(activity.start_time, activity.duration),
            duration: format!("Duration: {}", format_duration(activity.duration)),
            position: hover.pointer + TOOLTIP_OFFSET,
        })
    }

    /// Blank names are refused by both forms; the form stays open with the
    /// draft as typed.
    fn submit(&mut self) {
        if let Some(edit) = self.editing.take() {
            if edit.draft.name.trim().is_empty() {
                self.editing = Some(edit);
            } else {
                self.schedule.update(edit.id, edit.draft);
            }
            return;
        }
        if !self.add_form_open {
            return;
        }
        let count = self.schedule.len();
        let draft = self.new_draft.clone();
        if self
            .schedule
            .add(&draft.name, draft.start_time, draft.duration, &draft.color)
            .is_some()
        {
            self.add_form_open = false;
            self.new_draft = ActivityFields {
                color: palette_color_for(count, &self.palette),
                ..ActivityFields::default()
            };
        }
    }

    fn after_list_replaced(&mut self) {
        self.file_panel_open = false;
        self.hover = None;
        if self
            .editing
            .as_ref()
            .is_some_and(|edit| self.schedule.find(edit.id).is_none())
        {
            self.editing = None;
        }
    }
}
