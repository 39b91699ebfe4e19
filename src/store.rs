//! Persisted dock state and its JSON file store.
//!
//! # File format
//!
//! ```json
//! {
//!   "side": "right",
//!   "apps": [ { "name": "Notes", "path": "/home/me/notes.txt" } ],
//!   "pos": [ 24, 120 ]
//! }
//! ```
//!
//! Every key is optional.  Older versions wrote a bare array of shortcuts
//! instead of an object; that layout is still accepted on load (side
//! defaults to right, no position) and is upgraded on the next save.

use crate::shortcut::{Position, Shortcut, Side};
use crate::traits::ConfigStore;
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default file name, resolved against the working directory.
pub const DEFAULT_STATE_FILE: &str = "dock_config.json";

/// Everything the dock remembers between runs.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockState {
    /// Which side the settings panel opens on.
    #[serde(default)]
    pub side: Side,

    /// Shortcuts in display order.
    #[serde(default, rename = "apps")]
    pub shortcuts: Vec<Shortcut>,

    /// Last window position; `None` until the dock has been moved.
    #[serde(default, rename = "pos", skip_serializing_if = "Option::is_none")]
    pub window_position: Option<Position>,
}

/// The two on-disk layouts, told apart by their JSON shape.
#[derive(Debug, Clone, PartialEq)]
enum StoredLayout {
    /// `{ "side": …, "apps": […], "pos": [x, y] }`
    Current(DockState),
    /// `[ { "name": …, "path": … }, … ]`
    Legacy(Vec<Shortcut>),
}

impl<'de> Deserialize<'de> for StoredLayout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = StoredLayout;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a dock state object or an array of shortcuts")
            }
            fn visit_map<A>(self, map: A) -> Result<StoredLayout, A::Error>
            where
                A: MapAccess<'de>,
            {
                let state = DockState::deserialize(MapAccessDeserializer::new(map))?;
                Ok(StoredLayout::Current(state))
            }
            fn visit_seq<A>(self, seq: A) -> Result<StoredLayout, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let shortcuts = Vec::<Shortcut>::deserialize(SeqAccessDeserializer::new(seq))?;
                Ok(StoredLayout::Legacy(shortcuts))
            }
        }
        deserializer.deserialize_any(V)
    }
}

impl From<StoredLayout> for DockState {
    fn from(layout: StoredLayout) -> Self {
        match layout {
            StoredLayout::Current(state) => state,
            StoredLayout::Legacy(shortcuts) => DockState {
                shortcuts,
                ..DockState::default()
            },
        }
    }
}

/// Parse the contents of a state file in either layout.
pub fn parse_state(contents: &str) -> Result<DockState, serde_json::Error> {
    serde_json::from_str::<StoredLayout>(contents).map(DockState::from)
}

/// Errors from reading or writing the state file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode dock state: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// [`ConfigStore`] backed by a single JSON file.
///
/// Each save rewrites the whole file.  No locking is done; two processes
/// sharing a file simply race and the last write wins.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Create a store for the file at `path`.  Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The filesystem path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_FILE)
    }
}

impl ConfigStore for JsonConfigStore {
    type Error = StoreError;

    fn load(&self) -> Result<DockState, StoreError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_state(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, state: &DockState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
