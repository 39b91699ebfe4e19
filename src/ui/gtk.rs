//! GTK4 + layer-shell dock window that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window                          (layer-shell, transparent)
//! └ .dock-root                   (horizontal box)
//!     ├ .dock                    (vertical column)
//!     │   ├ .dock-handle         (drag to move the window)
//!     │   ├ GtkScrolledWindow
//!     │   │   └ .dock-apps
//!     │   │       └ .dock-app    (one per shortcut)
//!     │   └ .dock-settings-toggle
//!     └ .settings-panel          (hidden until toggled)
//! ```
//!
//! The settings panel sits after the dock when the side is right and
//! before it when the side is left.
//!
//! # CSS selectors
//!
//! | Selector                 | Targets                                   |
//! |--------------------------|-------------------------------------------|
//! | `window`                 | The dock window (keep transparent)        |
//! | `.dock`                  | The icon column                           |
//! | `.dock-handle`           | The drag bar above the icons              |
//! | `.dock-app`              | Every shortcut button                     |
//! | `.dock-settings-toggle`  | The gear button                           |
//! | `.settings-panel`        | The add/remove/side panel                 |
//! | `.settings-add`          | The "Add" button                          |
//! | `.settings-quit`         | The "Quit" button                         |

use crate::command::DockCommand;
use crate::config::UiConfig;
use crate::controller::{DockController, Response};
use crate::shortcut::{default_name_for, Side};
use crate::traits::{ConfigStore, Launcher};
use gtk4::prelude::*;
use gtk4::{gdk, gio, glib};
use gtk4_layer_shell::{Edge, LayerShell};
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Shown when a shortcut's icon cannot be resolved.
const PLACEHOLDER_ICON: &str = "application-x-executable";

//  Default CSS

const DEFAULT_CSS: &str = r#"
window,
window.background {
    background-color: transparent;
    background: none;
}

.dock {
    background-color: rgba(255, 255, 255, 0.12);
    border: 1px solid rgba(255, 255, 255, 0.18);
    border-radius: 30px;
    padding: 15px 10px;
}

.dock-handle {
    min-height: 4px;
    min-width: 40px;
    border-radius: 2px;
    background-color: rgba(255, 255, 255, 0.8);
}

.dock-app {
    background: rgba(255, 255, 255, 0.08);
    border: 1px solid rgba(255, 255, 255, 0.12);
    border-radius: 20px;
}

.dock-app:hover {
    background: rgba(255, 255, 255, 0.3);
    border: 1px solid white;
}

.dock-settings-toggle {
    background: rgba(0, 0, 0, 0.16);
    border: none;
    border-radius: 30px;
    color: white;
    font-size: 24px;
}

.dock-settings-toggle:hover {
    background: rgba(0, 0, 0, 0.32);
}

.settings-panel {
    background: rgba(255, 255, 255, 0.1);
    border: 1px solid rgba(255, 255, 255, 0.16);
    border-radius: 25px;
    padding: 12px;
    color: white;
}

.settings-panel entry {
    background: rgba(0, 0, 0, 0.24);
    border: none;
    border-radius: 10px;
    color: white;
}

.settings-add {
    background: #007aff;
    font-weight: bold;
    border-radius: 10px;
}

.settings-quit {
    background: rgba(200, 50, 50, 0.24);
    font-weight: bold;
    border-radius: 10px;
    margin-top: 10px;
}

.settings-quit:hover {
    background: rgba(200, 50, 50, 0.6);
}
"#;

//  Dock window

/// Every widget the handlers need, plus the controller they drive.
struct DockUi<S: ConfigStore, L: Launcher> {
    controller: RefCell<DockController<S, L>>,
    config: UiConfig,
    main_loop: glib::MainLoop,

    window: gtk4::Window,
    root: gtk4::Box,
    dock_frame: gtk4::Box,
    apps_box: gtk4::Box,
    panel: gtk4::Box,
    name_entry: gtk4::Entry,
    path_entry: gtk4::Entry,
    side_button: gtk4::Button,

    /// Current window margins `(left, top)`.
    position: Cell<(i32, i32)>,
}

impl<S: ConfigStore + 'static, L: Launcher + 'static> DockUi<S, L> {
    fn build(
        controller: DockController<S, L>,
        config: UiConfig,
        main_loop: glib::MainLoop,
    ) -> Rc<Self> {
        let window = gtk4::Window::new();
        window.init_layer_shell();
        window.set_layer(gtk4_layer_shell::Layer::Top);
        window.set_namespace("glassdock");
        window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
        window.set_anchor(Edge::Top, true);
        window.set_anchor(Edge::Left, true);
        window.set_decorated(false);
        window.remove_css_class("background");

        let root = gtk4::Box::new(gtk4::Orientation::Horizontal, 10);
        root.add_css_class("dock-root");
        window.set_child(Some(&root));

        //  Dock column
        let dock_frame = gtk4::Box::new(gtk4::Orientation::Vertical, 15);
        dock_frame.add_css_class("dock");
        dock_frame.set_size_request(config.dock_width, -1);

        let handle = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        handle.add_css_class("dock-handle");
        handle.set_halign(gtk4::Align::Center);
        dock_frame.append(&handle);

        let apps_box = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
        apps_box.add_css_class("dock-apps");
        let scroll = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(gtk4::PolicyType::Never)
            .vscrollbar_policy(gtk4::PolicyType::External)
            .propagate_natural_height(true)
            .vexpand(true)
            .build();
        scroll.set_child(Some(&apps_box));
        dock_frame.append(&scroll);

        let settings_toggle = gtk4::Button::with_label("⚙");
        settings_toggle.add_css_class("dock-settings-toggle");
        settings_toggle.set_size_request(60, 60);
        settings_toggle.set_halign(gtk4::Align::Center);
        dock_frame.append(&settings_toggle);

        //  Settings panel
        let panel = gtk4::Box::new(gtk4::Orientation::Vertical, 8);
        panel.add_css_class("settings-panel");
        panel.set_size_request(config.panel_width, -1);
        panel.set_visible(false);

        let title = gtk4::Label::new(None);
        title.set_markup("<b>ADD AN APP / GAME</b>");
        panel.append(&title);

        let name_entry = gtk4::Entry::new();
        name_entry.set_placeholder_text(Some("Name…"));
        panel.append(&name_entry);

        let path_entry = gtk4::Entry::new();
        path_entry.set_placeholder_text(Some("Path or file…"));
        panel.append(&path_entry);

        let browse_button = gtk4::Button::with_label("Browse…");
        panel.append(&browse_button);

        let add_button = gtk4::Button::with_label("Add");
        add_button.add_css_class("settings-add");
        panel.append(&add_button);

        let spacer = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
        spacer.set_vexpand(true);
        panel.append(&spacer);

        let side_button = gtk4::Button::new();
        panel.append(&side_button);

        let link_button = gtk4::Button::with_label("Check for updates");
        panel.append(&link_button);

        let quit_button = gtk4::Button::with_label("Quit the dock");
        quit_button.add_css_class("settings-quit");
        panel.append(&quit_button);

        root.append(&dock_frame);
        root.append(&panel);

        let position = {
            let dock = controller.dock();
            dock.window_position()
                .map(|p| (p.x, p.y))
                .unwrap_or((config.initial_x, config.initial_y))
        };

        let ui = Rc::new(Self {
            controller: RefCell::new(controller),
            config,
            main_loop,
            window,
            root,
            dock_frame,
            apps_box,
            panel,
            name_entry,
            path_entry,
            side_button,
            position: Cell::new(position),
        });

        //  Signal wiring
        settings_toggle.connect_clicked(ui.on_click(|ui| {
            let open = !ui.panel.is_visible();
            ui.panel.set_visible(open);
            debug!("settings panel {}", if open { "opened" } else { "closed" });
        }));
        browse_button.connect_clicked(ui.on_click(|ui| ui.browse()));
        add_button.connect_clicked(ui.on_click(|ui| ui.add_from_entries()));
        ui.side_button.connect_clicked(ui.on_click(|ui| {
            ui.dispatch(DockCommand::ToggleSide);
        }));
        link_button.connect_clicked(ui.on_click(|ui| {
            ui.dispatch(DockCommand::OpenProjectLink);
        }));
        quit_button.connect_clicked(ui.on_click(|ui| {
            ui.dispatch(DockCommand::Quit);
        }));

        let drag = gtk4::GestureDrag::new();
        drag.set_button(gdk::BUTTON_PRIMARY);
        {
            let weak = Rc::downgrade(&ui);
            drag.connect_drag_update(move |_, dx, dy| {
                if let Some(ui) = weak.upgrade() {
                    ui.drag_by(dx, dy);
                }
            });
        }
        {
            let weak = Rc::downgrade(&ui);
            drag.connect_drag_end(move |_, _, _| {
                if let Some(ui) = weak.upgrade() {
                    let (x, y) = ui.position.get();
                    ui.dispatch(DockCommand::MoveTo { x, y });
                }
            });
        }
        handle.add_controller(drag);

        {
            let main_loop = ui.main_loop.clone();
            ui.window.connect_close_request(move |_| {
                main_loop.quit();
                glib::Propagation::Proceed
            });
        }

        ui
    }

    /// Wrap a handler so it only holds a weak reference to the UI.
    fn on_click<F>(self: &Rc<Self>, f: F) -> impl Fn(&gtk4::Button) + 'static
    where
        F: Fn(&Rc<Self>) + 'static,
    {
        let weak = Rc::downgrade(self);
        move |_| {
            if let Some(ui) = weak.upgrade() {
                f(&ui);
            }
        }
    }

    /// Run a command through the controller and refresh what it changed.
    fn dispatch(self: &Rc<Self>, cmd: DockCommand) -> Option<Response> {
        let result = self.controller.borrow_mut().handle(cmd);
        match result {
            Ok(response) => {
                self.apply(response);
                Some(response)
            }
            Err(e) => {
                error!("command error: {}", e);
                None
            }
        }
    }

    fn apply(self: &Rc<Self>, response: Response) {
        match response {
            Response::ShortcutsChanged => self.refresh_shortcuts(),
            Response::SideChanged(side) => self.apply_side(side),
            Response::Quit => self.main_loop.quit(),
            Response::Moved | Response::Unchanged => {}
        }
    }

    //  Rendering

    fn refresh_shortcuts(self: &Rc<Self>) {
        while let Some(child) = self.apps_box.first_child() {
            self.apps_box.remove(&child);
        }
        let shortcuts = self.controller.borrow().dock().shortcuts().to_vec();
        for (index, shortcut) in shortcuts.iter().enumerate() {
            let button = gtk4::Button::new();
            button.add_css_class("dock-app");
            button.set_size_request(self.config.button_size, self.config.button_size);
            button.set_halign(gtk4::Align::Center);
            button.set_tooltip_text(Some(&format!("{}\n(right-click to remove)", shortcut.name)));

            let image = resolve_icon(Path::new(&shortcut.path));
            image.set_pixel_size(self.config.icon_size);
            button.set_child(Some(&image));

            button.connect_clicked(self.on_click(move |ui| {
                ui.dispatch(DockCommand::Launch(index));
            }));

            let remove = gtk4::GestureClick::new();
            remove.set_button(gdk::BUTTON_SECONDARY);
            let weak = Rc::downgrade(self);
            remove.connect_pressed(move |_, _, _, _| {
                if let Some(ui) = weak.upgrade() {
                    ui.dispatch(DockCommand::RemoveShortcut(index));
                }
            });
            button.add_controller(remove);

            self.apps_box.append(&button);
        }
        debug!("rendered {} shortcut(s)", shortcuts.len());
    }

    fn apply_side(&self, side: Side) {
        match side {
            Side::Right => self.root.reorder_child_after(&self.panel, Some(&self.dock_frame)),
            Side::Left => self.root.reorder_child_after(&self.dock_frame, Some(&self.panel)),
        }
        self.side_button
            .set_label(&format!("Menu position: {}", side.to_string().to_uppercase()));
    }

    fn place(&self, x: i32, y: i32) {
        self.window.set_margin(Edge::Left, x);
        self.window.set_margin(Edge::Top, y);
        self.position.set((x, y));
    }

    /// The surface moves under the pointer, so each drag offset is relative
    /// to the last applied move.
    fn drag_by(&self, dx: f64, dy: f64) {
        let (x, y) = self.position.get();
        self.place(x + dx.round() as i32, y + dy.round() as i32);
    }

    //  Settings panel actions

    fn browse(self: &Rc<Self>) {
        let dialog = gtk4::FileDialog::builder()
            .title("Choose a file")
            .modal(true)
            .build();
        let weak = Rc::downgrade(self);
        dialog.open(Some(&self.window), gio::Cancellable::NONE, move |result| {
            let Some(ui) = weak.upgrade() else {
                return;
            };
            match result {
                Ok(file) => match file.path() {
                    Some(path) => ui.fill_from_pick(&path),
                    None => warn!("picked file has no local path: {}", file.uri()),
                },
                Err(e) => debug!("file dialog closed: {}", e),
            }
        });
    }

    fn fill_from_pick(&self, path: &Path) {
        self.path_entry.set_text(&path.to_string_lossy());
        if self.name_entry.text().is_empty() {
            if let Some(name) = default_name_for(path) {
                self.name_entry.set_text(&name);
            }
        }
    }

    fn add_from_entries(self: &Rc<Self>) {
        let cmd = DockCommand::AddShortcut {
            name: self.name_entry.text().to_string(),
            path: self.path_entry.text().to_string(),
        };
        if self.dispatch(cmd) == Some(Response::ShortcutsChanged) {
            self.name_entry.set_text("");
            self.path_entry.set_text("");
        }
    }
}

/// Platform icon for `path`, or the placeholder if it cannot be resolved.
fn resolve_icon(path: &Path) -> gtk4::Image {
    let file = gio::File::for_path(path);
    match file.query_info("standard::icon", gio::FileQueryInfoFlags::NONE, gio::Cancellable::NONE) {
        Ok(info) => match info.icon() {
            Some(icon) => gtk4::Image::from_gicon(&icon),
            None => gtk4::Image::from_icon_name(PLACEHOLDER_ICON),
        },
        Err(e) => {
            debug!("no icon for {}: {}", path.display(), e);
            gtk4::Image::from_icon_name(PLACEHOLDER_ICON)
        }
    }
}

//  Public API

/// Run the GTK4 main loop on the **current** (main) thread until the user
/// quits or closes the window.
pub fn run_main_loop<S, L>(
    controller: DockController<S, L>,
    css_path: Option<PathBuf>,
    ui_config: UiConfig,
) -> Result<(), glib::BoolError>
where
    S: ConfigStore + 'static,
    L: Launcher + 'static,
{
    gtk4::init()?;
    info!("GTK4 initialised on main thread");

    load_css(&css_path);

    let main_loop = glib::MainLoop::new(None, false);
    let ui = DockUi::build(controller, ui_config, main_loop.clone());

    let (x, y) = ui.position.get();
    ui.place(x, y);
    ui.refresh_shortcuts();
    let side = ui.controller.borrow().dock().side();
    ui.apply_side(side);
    ui.window.present();
    info!("dock shown at ({}, {}), side {}", x, y, side);

    info!("entering GLib main loop");
    main_loop.run();
    info!("GLib main loop exited");
    Ok(())
}

//  Dock style

/// Stylesheet text for the dock: the file at `css_path` when it can be read,
/// the built-in glass style otherwise.
fn dock_style(css_path: Option<&Path>) -> String {
    let Some(path) = css_path else {
        debug!("no dock style file configured; using the built-in glass style");
        return DEFAULT_CSS.to_string();
    };
    match std::fs::read_to_string(path) {
        Ok(css) => {
            info!("applying dock style from {}", path.display());
            css
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("no dock style at {}; using the built-in glass style", path.display());
            DEFAULT_CSS.to_string()
        }
        Err(e) => {
            warn!(
                "dock style {} unreadable: {}; using the built-in glass style",
                path.display(),
                e
            );
            DEFAULT_CSS.to_string()
        }
    }
}

fn load_css(css_path: &Option<PathBuf>) {
    let Some(display) = gdk::Display::default() else {
        warn!("no display to style; the dock keeps the GTK theme");
        return;
    };
    let provider = gtk4::CssProvider::new();
    #[allow(deprecated)]
    provider.load_from_data(&dock_style(css_path.as_deref()));
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
