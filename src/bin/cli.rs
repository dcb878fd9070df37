use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing_subscriber::EnvFilter;
use watch_planner::persistence::{
    load_activities_from_csv, load_document_from_path, save_activities_to_csv,
    save_document_to_dir,
};
use watch_planner::report::{agenda_frame, render_text_table};
use watch_planner::slot::{MAX_DURATION_SLOTS, parse_clock};
use watch_planner::{
    Action, AppState, DraftChange, OverlapGraph, PlannerConfig, SceneOptions, build_scene,
};

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  show                                   Show current schedule\n  add <start> <duration> <color|-> <name...>\n                                         Add an activity (start as HH:MM or slot, duration in 30min blocks)\n  edit <id> <start> <duration> <color|-> <name...>\n                                         Replace an activity's fields\n  delete <id>                            Delete an activity\n  sample                                 Load the sample schedule\n  export [dir]                           Save schedule-<date>-<weekday>.json\n  save                                   Quick save to the configured export directory\n  import <path>                          Load a saved schedule (replaces the current one)\n  csv save|load <path>                   Write or read activities as CSV\n  svg <path> [labels]                    Render the watch face as SVG\n  overlaps                               List groups of overlapping activities\n  tooltip <id>                           Show hover details for an activity\n  quit|exit                              Exit"
    );
}

fn render_schedule(state: &AppState) -> String {
    match agenda_frame(state.schedule.activities()) {
        Ok(df) => render_text_table(&df),
        Err(e) => format!("Could not build agenda: {e}"),
    }
}

fn parse_duration(input: &str) -> Option<u32> {
    let blocks: u32 = input.parse().ok()?;
    (1..=MAX_DURATION_SLOTS).contains(&blocks).then_some(blocks)
}

/// Fills the open form from command arguments and submits it.
fn fill_and_submit(state: &mut AppState, start: u32, duration: u32, color: &str, name: String) {
    state.apply(Action::EditDraft(DraftChange::Name(name)));
    state.apply(Action::EditDraft(DraftChange::StartTime(start)));
    state.apply(Action::EditDraft(DraftChange::Duration(duration)));
    if color != "-" {
        state.apply(Action::EditDraft(DraftChange::Color(color.to_string())));
    }
    state.apply(Action::Submit);
}

struct ActivityArgs {
    start: u32,
    duration: u32,
    color: String,
    name: String,
}

fn parse_activity_args<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<ActivityArgs, &'static str> {
    let start = parts.next().ok_or("missing start")?;
    let duration = parts.next().ok_or("missing duration")?;
    let color = parts.next().ok_or("missing color")?;
    let name = parts.collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err("missing name");
    }
    let start = parse_clock(start).ok_or("Invalid start (HH:MM on the half hour, or slot 0-47)")?;
    let duration = parse_duration(duration).ok_or("Invalid duration (1-16 blocks)")?;
    Ok(ActivityArgs {
        start,
        duration,
        color: color.to_string(),
        name,
    })
}

fn export(state: &mut AppState, dir: &Path) {
    match save_document_to_dir(state.schedule.activities(), dir, &Local::now()) {
        Ok(path) => {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            if let Some(notice) = state.apply(Action::Exported(filename)) {
                println!("{}", notice.message());
            }
            println!("Written to {}", path.display());
        }
        Err(e) => println!("Export error: {e}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match PlannerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("Config error: {e}; using defaults");
            PlannerConfig::default()
        }
    };
    let mut state = AppState::new(&config);

    println!("Watch Planner (CLI) - type 'help' for commands\n");
    println!("{}", render_schedule(&state));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => println!("{}", render_schedule(&state)),
            "add" => match parse_activity_args(parts) {
                Ok(args) => {
                    if !state.add_form_open {
                        state.apply(Action::ToggleAddForm);
                    }
                    let before = state.schedule.len();
                    fill_and_submit(&mut state, args.start, args.duration, &args.color, args.name);
                    if state.schedule.len() > before {
                        println!("Activity added.\n{}", render_schedule(&state));
                    } else {
                        println!("Activity name must not be empty.");
                    }
                }
                Err(msg) => println!("{msg}\nUsage: add <start> <duration> <color|-> <name...>"),
            },
            "edit" => {
                let id: i64 = match parts.next().and_then(|s| s.parse().ok()) {
                    Some(v) => v,
                    None => {
                        println!("Usage: edit <id> <start> <duration> <color|-> <name...>");
                        continue;
                    }
                };
                let args = match parse_activity_args(parts) {
                    Ok(args) => args,
                    Err(msg) => {
                        println!("{msg}\nUsage: edit <id> <start> <duration> <color|-> <name...>");
                        continue;
                    }
                };
                state.apply(Action::StartEdit(id));
                if !state.editing.as_ref().is_some_and(|edit| edit.id == id) {
                    println!("Activity {id} not found.");
                    continue;
                }
                fill_and_submit(&mut state, args.start, args.duration, &args.color, args.name);
                if state.editing.is_some() {
                    state.apply(Action::CancelForm);
                    println!("Activity name must not be empty.");
                    continue;
                }
                println!("Activity {id} updated.\n{}", render_schedule(&state));
            }
            "delete" => match parts.next().and_then(|s| s.parse::<i64>().ok()) {
                Some(id) => {
                    if state.schedule.find(id).is_some() {
                        state.apply(Action::Delete(id));
                        println!("Deleted activity {id}.\n{}", render_schedule(&state));
                    } else {
                        println!("Activity {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "sample" => {
                state.apply(Action::LoadSample);
                println!("Sample schedule loaded.\n{}", render_schedule(&state));
            }
            "export" => {
                let dir = parts
                    .next()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| config.export_dir.clone());
                export(&mut state, &dir);
            }
            "save" => {
                if let Some(notice) = state.apply(Action::QuickSave) {
                    println!("{}", notice.message());
                    continue;
                }
                let dir = config.export_dir.clone();
                export(&mut state, &dir);
            }
            "import" => match parts.next() {
                Some(path) => {
                    let result = match load_document_from_path(path) {
                        Ok(imported) => Ok(imported),
                        Err(watch_planner::PersistenceError::Import(err)) => Err(err),
                        Err(e) => {
                            println!("Error reading schedule file: {e}");
                            continue;
                        }
                    };
                    if let Some(notice) = state.apply(Action::Imported(result)) {
                        println!("{}", notice.message());
                    }
                    println!("{}", render_schedule(&state));
                }
                None => println!("Usage: import <path>"),
            },
            "csv" => {
                let mode = parts.next();
                let path = parts.next();
                match (mode, path) {
                    (Some("save"), Some(path)) => {
                        match save_activities_to_csv(state.schedule.activities(), path) {
                            Ok(()) => println!("Activities written to {path}"),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    (Some("load"), Some(path)) => match load_activities_from_csv(path) {
                        Ok(activities) => {
                            state.apply(Action::LoadActivities(activities));
                            println!("Activities loaded from {path}\n{}", render_schedule(&state));
                        }
                        Err(e) => println!("Error: {e}"),
                    },
                    _ => println!("Usage: csv save|load <path>"),
                }
            }
            "svg" => match parts.next() {
                Some(path) => {
                    let options = SceneOptions {
                        show_labels: parts.next() == Some("labels"),
                    };
                    let scene = build_scene(state.schedule.activities(), &config.face, options);
                    match std::fs::write(path, scene.to_svg()) {
                        Ok(()) => println!(
                            "Watch face with {} segments written to {path}",
                            scene.segment_count()
                        ),
                        Err(e) => println!("Error: {e}"),
                    }
                }
                None => println!("Usage: svg <path> [labels]"),
            },
            "overlaps" => {
                let graph = OverlapGraph::build(state.schedule.activities());
                let clusters = graph.clusters();
                if clusters.is_empty() {
                    println!("No overlapping activities.");
                }
                for cluster in clusters {
                    let names = cluster
                        .iter()
                        .filter_map(|id| state.schedule.find(*id))
                        .map(|activity| format!("{} ({})", activity.name, activity.id))
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("Overlap: {names}");
                }
            }
            "tooltip" => match parts.next().and_then(|s| s.parse::<i64>().ok()) {
                Some(id) => {
                    state.apply(Action::PointerEnter(id, kurbo::Point::ZERO));
                    match state.tooltip() {
                        Some(tip) => println!("{}\n{}\n{}", tip.name, tip.span, tip.duration),
                        None => println!("Activity {id} not found."),
                    }
                    state.apply(Action::PointerLeave);
                }
                None => println!("Usage: tooltip <id>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
