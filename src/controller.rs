//! The orchestrator that ties the dock, the launcher and the front end
//! together.
//!
//! [`DockController`] owns the [`Dock`] and reacts to [`DockCommand`]s by
//! mutating it or opening targets through the [`Launcher`] trait.  It tells
//! the caller what changed through a [`Response`] so the front end only
//! redraws what it has to.

use crate::command::DockCommand;
use crate::dock::{Dock, DockError};
use crate::shortcut::Side;
use crate::traits::{ConfigStore, Launcher};
use log::{debug, info, warn};
use std::path::Path;

/// Possible errors from the controller.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Dock(#[from] DockError),

    /// The launcher failed to start the target.
    #[error("launch failed: {0}")]
    Launch(String),
}

/// What the front end has to refresh after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Nothing visible changed.
    Unchanged,
    /// The shortcut list was added to or removed from.
    ShortcutsChanged,
    /// The side flipped; relayout the dock and panel.
    SideChanged(Side),
    /// The window position was recorded.
    Moved,
    /// The user asked to exit.
    Quit,
}

/// Applies commands to a [`Dock`] and a [`Launcher`].
///
/// # Typical usage
///
/// ```ignore
/// let dock = Dock::open(JsonConfigStore::default());
/// let mut controller = DockController::new(dock, SystemLauncher::new(), url);
/// controller.handle(DockCommand::ToggleSide)?;
/// ```
pub struct DockController<S: ConfigStore, L: Launcher> {
    dock: Dock<S>,
    launcher: L,
    project_url: String,
}

impl<S: ConfigStore, L: Launcher> DockController<S, L> {
    pub fn new(dock: Dock<S>, launcher: L, project_url: impl Into<String>) -> Self {
        Self {
            dock,
            launcher,
            project_url: project_url.into(),
        }
    }

    /// Shared reference to the dock, for rendering.
    pub fn dock(&self) -> &Dock<S> {
        &self.dock
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Process a single command.
    pub fn handle(&mut self, cmd: DockCommand) -> Result<Response, ControllerError> {
        debug!("handling {:?}", cmd);
        match cmd {
            DockCommand::AddShortcut { name, path } => {
                if self.dock.add_shortcut(&name, &path) {
                    Ok(Response::ShortcutsChanged)
                } else {
                    Ok(Response::Unchanged)
                }
            }
            DockCommand::RemoveShortcut(index) => {
                self.dock.remove_shortcut(index)?;
                Ok(Response::ShortcutsChanged)
            }
            DockCommand::ToggleSide => Ok(Response::SideChanged(self.dock.toggle_side())),
            DockCommand::MoveTo { x, y } => {
                self.dock.set_window_position(x, y);
                Ok(Response::Moved)
            }
            DockCommand::Launch(index) => {
                let shortcut = self.dock.resolve_shortcut(index)?;
                let path = Path::new(&shortcut.path);
                if !path.exists() {
                    warn!("{:?}: {} does not exist, not launching", shortcut.name, path.display());
                    return Ok(Response::Unchanged);
                }
                info!("launching {:?} ({})", shortcut.name, path.display());
                self.launcher
                    .open_path(path)
                    .map_err(|e| ControllerError::Launch(e.to_string()))?;
                Ok(Response::Unchanged)
            }
            DockCommand::OpenProjectLink => {
                info!("opening {}", self.project_url);
                self.launcher
                    .open_url(&self.project_url)
                    .map_err(|e| ControllerError::Launch(e.to_string()))?;
                Ok(Response::Unchanged)
            }
            DockCommand::Quit => {
                info!("quit requested");
                Ok(Response::Quit)
            }
        }
    }
}
