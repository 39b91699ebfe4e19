//! Every action a user (or a script) can ask the dock to perform.
//!
//! The GTK front end builds these from button clicks and drag gestures;
//! headless mode reads them as newline-delimited JSON:
//!
//! ```json
//! {"AddShortcut":{"name":"Notes","path":"/home/me/notes.txt"}}
//! {"RemoveShortcut":0}
//! "ToggleSide"
//! {"MoveTo":{"x":40,"y":200}}
//! {"Launch":1}
//! "OpenProjectLink"
//! "Quit"
//! ```

use serde::{Deserialize, Serialize};

/// A single user intent.
///
/// Commands are produced by the UI or a
/// [`CommandSource`](crate::traits::CommandSource) and consumed by the
/// [`DockController`](crate::controller::DockController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockCommand {
    /// Append a shortcut.  Ignored when either field is empty.
    AddShortcut { name: String, path: String },

    /// Remove the shortcut at this index (as currently displayed).
    RemoveShortcut(usize),

    /// Flip the settings panel to the other side of the dock.
    ToggleSide,

    /// The dock window has been moved to `(x, y)`.
    MoveTo { x: i32, y: i32 },

    /// Open the shortcut at this index with the default handler, if its
    /// path still exists.
    Launch(usize),

    /// Open the project page in the browser.
    OpenProjectLink,

    /// Exit the dock.
    Quit,
}
