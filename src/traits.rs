//! Core traits that decouple the dock from where its state is kept, how
//! shortcuts are opened, and where commands come from.
//!
//! The [`Dock`](crate::dock::Dock) only knows about [`ConfigStore`]; the
//! [`DockController`](crate::controller::DockController) additionally talks
//! to a [`Launcher`].  Test doubles for both live next to the code that
//! uses them.

use crate::command::DockCommand;
use crate::store::DockState;
use log::{info, warn};
use std::path::Path;
use std::sync::mpsc;

/// Persistence for the dock state.
///
/// An implementation might write a JSON file in the working directory, or
/// it might be an in-memory recorder used in tests.
pub trait ConfigStore {
    /// The error type produced by this store.
    type Error: std::error::Error + 'static;

    /// Read the persisted state.
    fn load(&self) -> Result<DockState, Self::Error>;

    /// Overwrite the persisted state in full.
    fn save(&self, state: &DockState) -> Result<(), Self::Error>;

    /// Read the persisted state, substituting [`DockState::default`] for
    /// any read or parse failure.  Never fails.
    fn load_or_default(&self) -> DockState {
        match self.load() {
            Ok(state) => state,
            Err(e) => {
                if is_not_found(&e) {
                    info!("no dock state yet ({}), starting empty", e);
                } else {
                    warn!("ignoring unreadable dock state: {}", e);
                }
                DockState::default()
            }
        }
    }
}

/// Walk the error chain looking for an [`std::io::ErrorKind::NotFound`].
fn is_not_found(e: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(e);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            return io.kind() == std::io::ErrorKind::NotFound;
        }
        current = err.source();
    }
    false
}

/// Opens shortcut targets and links with whatever the platform considers
/// the default handler.
pub trait Launcher {
    /// The error type produced by this launcher.
    type Error: std::error::Error + 'static;

    /// Open `path` (a document, folder or executable).
    ///
    /// Callers check that the path exists first; the launcher itself does
    /// not.
    fn open_path(&self, path: &Path) -> Result<(), Self::Error>;

    /// Open `url` in the default browser.
    fn open_url(&self, url: &str) -> Result<(), Self::Error>;
}

/// A source of [`DockCommand`]s.
///
/// Implementations read some transport (stdin, a pipe, a test fixture)
/// and forward parsed commands into the provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start reading and forward every incoming [`DockCommand`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<DockCommand>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::{Shortcut, Side};
    use std::cell::RefCell;

    #[derive(Debug, thiserror::Error)]
    enum MockError {
        #[error("io: {0}")]
        Io(#[from] std::io::Error),
        #[error("garbage")]
        Garbage,
    }

    /// A store whose `load` result is scripted.
    struct ScriptedStore {
        next: RefCell<Option<Result<DockState, MockError>>>,
    }

    impl ConfigStore for ScriptedStore {
        type Error = MockError;

        fn load(&self) -> Result<DockState, MockError> {
            self.next.borrow_mut().take().unwrap_or(Err(MockError::Garbage))
        }

        fn save(&self, _: &DockState) -> Result<(), MockError> {
            Ok(())
        }
    }

    #[test]
    fn load_or_default_passes_through_success() {
        let state = DockState {
            shortcuts: vec![Shortcut::new("A", "/a")],
            side: Side::Left,
            window_position: None,
        };
        let store = ScriptedStore {
            next: RefCell::new(Some(Ok(state.clone()))),
        };
        assert_eq!(store.load_or_default(), state);
    }

    #[test]
    fn load_or_default_swallows_missing_file() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let store = ScriptedStore {
            next: RefCell::new(Some(Err(MockError::Io(missing)))),
        };
        assert_eq!(store.load_or_default(), DockState::default());
    }

    #[test]
    fn load_or_default_swallows_garbage() {
        let store = ScriptedStore {
            next: RefCell::new(Some(Err(MockError::Garbage))),
        };
        assert_eq!(store.load_or_default(), DockState::default());
    }

    #[test]
    fn not_found_is_detected_through_source_chain() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(is_not_found(&MockError::Io(missing)));
        assert!(!is_not_found(&MockError::Garbage));
    }
}
