mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::build`, `crate::state`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use floorplan_gui_lib::build;
pub use floorplan_gui_lib::export;
pub use floorplan_gui_lib::state;

use std::path::PathBuf;

use app::FloorplanApp;
use state::{AppSettings, AppState, WorldStore};

/// Command-line options
#[derive(Debug, Default)]
struct CliArgs {
    /// World to open on start
    world: Option<String>,
    /// Storage root override
    data_dir: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floorplan_gui=info,floorplan_gui_lib=info".into()),
        )
        .init();

    let args = parse_args(std::env::args().skip(1));

    let Some(root) = args.data_dir.clone().or_else(WorldStore::default_root) else {
        tracing::error!("No data directory available; pass --data-dir <path>");
        std::process::exit(1);
    };
    let worlds = match WorldStore::open(&root) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open world store at {}: {e}", root.display());
            std::process::exit(1);
        }
    };
    let state = AppState::new(AppSettings::load(), worlds);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Floorplan Wall Editor")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    let initial_world = args.world;
    if let Err(e) = eframe::run_native(
        "floorplan-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(FloorplanApp::new(cc, state, initial_world)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> CliArgs {
    let mut out = CliArgs::default();
    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--world" => out.world = args.next(),
            "--data-dir" => out.data_dir = args.next().map(PathBuf::from),
            other => tracing::warn!("Ignoring unknown argument {other:?}"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_world_and_data_dir() {
        let args = parse(&["--world", "abc", "--data-dir", "/tmp/fp"]);
        assert_eq!(args.world.as_deref(), Some("abc"));
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/fp")));
    }

    #[test]
    fn test_parse_missing_value() {
        let args = parse(&["--world"]);
        assert!(args.world.is_none());
    }
}
