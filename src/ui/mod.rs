//! Front ends for the dock.
//!
//! When the `ui-gtk` feature is enabled, [`gtk::run_main_loop`] takes over
//! the main thread and drives the dock window through the GLib main loop.

#[cfg(feature = "ui-gtk")]
pub mod gtk;
