//! Data types shared by every part of glassdock.
//!
//! [`Shortcut`] is a named, launchable path.  [`Side`] tells which edge
//! the settings panel sits on relative to the dock, and [`Position`] is the
//! last known top-left corner of the dock window.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// A named reference to a launchable path.
///
/// Neither field is unique; two shortcuts may carry the same name and
/// path.  Within a session a shortcut is identified by its index in the
/// dock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    /// Display label.
    pub name: String,
    /// Filesystem path or executable reference, opaque to the dock.
    pub path: String,
}

impl Shortcut {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Horizontal edge the dock is anchored toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    #[default]
    Right,
}

impl Side {
    /// The opposite side.
    pub fn toggled(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Parse a side string (case-insensitive).  Anything unrecognised is
/// [`Side::Right`].
fn parse_side(s: &str) -> Side {
    match s.trim().to_lowercase().as_str() {
        "left" => Side::Left,
        _ => Side::Right,
    }
}

// A `null` side is treated like an unrecognised one.
impl<'de> Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.as_deref().map(parse_side).unwrap_or_default())
    }
}

/// Top-left corner of the dock window, in screen pixels.
///
/// Stored on disk as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, i32) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

/// Derive a display name from a picked file.
///
/// Takes the file name up to its first `.` and capitalises it, so
/// `/games/super.tux.x86_64` becomes `"Super"`.  Returns `None` when
/// nothing usable is left (e.g. a dotfile or a bare root).
pub fn default_name_for(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    let base = file_name.split('.').next().unwrap_or_default();
    let mut chars = base.chars();
    let first = chars.next()?;
    let mut name: String = first.to_uppercase().collect();
    name.extend(chars.flat_map(|c| c.to_lowercase()));
    Some(name)
}
