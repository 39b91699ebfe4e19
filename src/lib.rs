//! **glassdock**: a translucent floating application dock.
//!
//! The dock shows user-configured shortcuts (a name plus a file or
//! executable path) as clickable icons, can be dragged around, and keeps its
//! shortcut list, side and window position in a small JSON file.  A
//! settings panel adds shortcuts, flips the side, and quits.
//!
//! # Architecture
//!
//! The crate is organised around three traits:
//!
//! * [`traits::ConfigStore`]: abstracts where the dock state is persisted
//!   so the [`dock::Dock`] model is not coupled to the filesystem.
//! * [`traits::Launcher`]: abstracts how targets are opened so the
//!   [`controller::DockController`] is not coupled to the OS.
//! * [`traits::CommandSource`]: abstracts where user intent comes from
//!   in headless mode.
//!
//! Concrete implementations live in [`store`] (JSON file), [`launcher`]
//! (platform opener) and [`source`] (newline-delimited JSON); the GTK
//! window lives in [`ui`].

pub mod command;
pub mod config;
pub mod controller;
pub mod dock;
pub mod launcher;
pub mod shortcut;
pub mod source;
pub mod store;
pub mod traits;
pub mod ui;
