//! Application settings.
//!
//! Settings are separate from the dock *state* (see [`crate::store`]): they
//! are hand-edited, never written by glassdock, and live at
//! `$XDG_CONFIG_HOME/glassdock/config.json`.
//!
//! # Example
//!
//! ```json
//! {
//!   "project_url": "https://example.org/glassdock",
//!   "state_file": "/home/me/.local/state/glassdock.json",
//!   "ui": {
//!     "dock_width": 95,
//!     "panel_width": 250,
//!     "icon_size": 40,
//!     "button_size": 70,
//!     "initial_x": 24,
//!     "initial_y": 120
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Page opened by the "check for updates" button unless overridden.
pub const DEFAULT_PROJECT_URL: &str = "https://github.com/topics/dock";

/// Top-level settings.
///
/// Every field is optional; a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Link behind the project/update button.
    pub project_url: String,

    /// Where the dock state is persisted.  `None` means `dock_config.json`
    /// in the working directory.  The `--state` flag takes precedence.
    pub state_file: Option<PathBuf>,

    /// Widget sizes and initial placement.
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_url: DEFAULT_PROJECT_URL.into(),
            state_file: None,
            ui: UiConfig::default(),
        }
    }
}

/// Widget sizes (pixels) and where the dock appears before it has ever
/// been moved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Width of the dock column.
    pub dock_width: i32,
    /// Width of the settings panel.
    pub panel_width: i32,
    /// Icon size inside a shortcut button.
    pub icon_size: i32,
    /// Side length of a shortcut button.
    pub button_size: i32,
    /// Left margin used when no position has been persisted.
    pub initial_x: i32,
    /// Top margin used when no position has been persisted.
    pub initial_y: i32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dock_width: 95,
            panel_width: 250,
            icon_size: 40,
            button_size: 70,
            initial_x: 24,
            initial_y: 120,
        }
    }
}

impl Config {
    /// Load settings from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Resolve the dock state file: `cli_override`, then `state_file`,
    /// then [`DEFAULT_STATE_FILE`](crate::store::DEFAULT_STATE_FILE).
    pub fn state_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.state_file.clone())
            .unwrap_or_else(|| PathBuf::from(crate::store::DEFAULT_STATE_FILE))
    }
}

/// Error from loading or parsing a settings file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "project_url": "https://example.org",
            "state_file": "/tmp/dock.json",
            "ui": {
                "dock_width": 120,
                "panel_width": 300,
                "icon_size": 32,
                "button_size": 64,
                "initial_x": 0,
                "initial_y": 10
            }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.project_url, "https://example.org");
        assert_eq!(cfg.state_file, Some(PathBuf::from("/tmp/dock.json")));
        assert_eq!(cfg.ui.dock_width, 120);
        assert_eq!(cfg.ui.panel_width, 300);
        assert_eq!(cfg.ui.icon_size, 32);
        assert_eq!(cfg.ui.button_size, 64);
        assert_eq!(cfg.ui.initial_x, 0);
        assert_eq!(cfg.ui.initial_y, 10);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        let ud = UiConfig::default();
        assert_eq!(cfg.project_url, DEFAULT_PROJECT_URL);
        assert_eq!(cfg.state_file, None);
        assert_eq!(cfg.ui.dock_width, ud.dock_width);
        assert_eq!(cfg.ui.panel_width, ud.panel_width);
        assert_eq!(cfg.ui.icon_size, ud.icon_size);
        assert_eq!(cfg.ui.button_size, ud.button_size);
    }

    #[test]
    fn deserialize_partial_ui() {
        let cfg: Config = serde_json::from_str(r#"{ "ui": { "icon_size": 48 } }"#).unwrap();
        assert_eq!(cfg.ui.icon_size, 48);
        assert_eq!(cfg.ui.dock_width, UiConfig::default().dock_width);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "ui": {}, "future_section": { "key": 42 } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn state_path_precedence() {
        let mut cfg = Config::default();
        assert_eq!(cfg.state_path(None), PathBuf::from("dock_config.json"));
        cfg.state_file = Some("/from/settings.json".into());
        assert_eq!(cfg.state_path(None), PathBuf::from("/from/settings.json"));
        assert_eq!(
            cfg.state_path(Some("/from/cli.json".into())),
            PathBuf::from("/from/cli.json")
        );
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("config.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
