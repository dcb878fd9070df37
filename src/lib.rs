pub mod activity;
pub mod app;
pub mod config;
pub mod graph;
pub mod layout;
pub mod persistence;
pub mod report;
pub mod scene;
pub mod slot;
pub mod store;

pub use activity::{Activity, ActivityFields, PALETTE};
pub use app::{Action, AppState, DraftChange, EditForm, FormState, Notice, Tooltip};
pub use config::{ConfigError, FaceGeometry, PlannerConfig};
pub use graph::OverlapGraph;
pub use layout::{LabelPlacement, TextAnchor, label_position, path_for_segment};
pub use persistence::{
    ImportError, ImportedSchedule, PersistenceError, ScheduleDocument, export_document,
    export_filename, import_document, import_schedule,
};
pub use scene::{Scene, SceneOptions, Shape, build_scene};
pub use slot::slot_to_time;
pub use store::Schedule;
