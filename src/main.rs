//! Entry point for the **glassdock** binary.
//!
//! Loads settings and the persisted dock state, then either shows the GTK
//! dock (feature `ui-gtk`) or, with `--headless`, applies newline-delimited
//! JSON commands read from stdin.
//!
//! Flags:
//!
//! * `--state <path>`: dock state file (default `dock_config.json` in the
//!   working directory, or `state_file` from the settings)
//! * `--headless`: no window; read commands from stdin

use glassdock::command::DockCommand;
use glassdock::config::Config;
use glassdock::controller::{DockController, Response};
use glassdock::dock::Dock;
use glassdock::launcher::SystemLauncher;
use glassdock::source::LineSource;
use glassdock::store::JsonConfigStore;
use glassdock::traits::{CommandSource, ConfigStore, Launcher};
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc;

/// Resolve the settings directory (`$XDG_CONFIG_HOME/glassdock`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("glassdock")
}

/// Try to load settings from `$XDG_CONFIG_HOME/glassdock/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded settings from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no settings file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// Resolve the CSS stylesheet path.
#[cfg(feature = "ui-gtk")]
fn css_path() -> PathBuf {
    config_dir().join("style.css")
}

/// Value following `flag` on the command line, if any.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

//  Main

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let headless = args.iter().any(|a| a == "--headless");

    let config = load_config();
    let state_path = config.state_path(arg_value(&args, "--state").map(PathBuf::from));
    info!("dock state file: {}", state_path.display());

    let dock = Dock::open(JsonConfigStore::new(&state_path));
    let controller = DockController::new(dock, SystemLauncher::new(), config.project_url.clone());

    if headless {
        run_headless(controller);
    } else {
        run_window(controller, config);
    }
}

//  Front ends

#[cfg(feature = "ui-gtk")]
fn run_window<S, L>(controller: DockController<S, L>, config: Config)
where
    S: ConfigStore + 'static,
    L: Launcher + 'static,
{
    if let Err(e) = glassdock::ui::gtk::run_main_loop(controller, Some(css_path()), config.ui) {
        error!("failed to start the dock window: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "ui-gtk"))]
fn run_window<S: ConfigStore, L: Launcher>(controller: DockController<S, L>, _config: Config) {
    info!("built without `ui-gtk`, running headless");
    run_headless(controller);
}

/// Apply commands from stdin until `Quit` or end of input.
fn run_headless<S: ConfigStore, L: Launcher>(mut controller: DockController<S, L>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<DockCommand>();
    std::thread::spawn(move || {
        let mut source = LineSource::stdin();
        if let Err(e) = source.run(cmd_tx) {
            error!("command input error: {}", e);
        }
    });

    info!("glassdock running headless, reading commands from stdin");
    for cmd in cmd_rx {
        match controller.handle(cmd) {
            Ok(Response::Quit) => break,
            Ok(response) => {
                let dock = controller.dock();
                info!(
                    "{:?}: {} shortcut(s), side {}, position {:?}",
                    response,
                    dock.shortcuts().len(),
                    dock.side(),
                    dock.window_position()
                );
            }
            Err(e) => error!("command error: {}", e),
        }
    }
    info!("exiting");
}
