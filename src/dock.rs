//! In-memory dock model.
//!
//! [`Dock`] owns the [`DockState`] and a [`ConfigStore`].  Every mutating
//! operation updates the state and then writes it through the store
//! immediately; there is no dirty flag and no explicit flush.  A failed
//! write is logged and the in-memory change is kept.

use crate::shortcut::{Position, Shortcut, Side};
use crate::store::DockState;
use crate::traits::ConfigStore;
use log::{debug, error, info};

/// Possible errors from dock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DockError {
    /// A shortcut index that the dock does not currently hold.
    #[error("shortcut index {index} out of range (dock has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The dock: an ordered list of shortcuts plus side and window position.
///
/// Shortcuts are addressed by index.  Removing index `i` shifts every later
/// shortcut down by one, so an index is only meaningful against the list
/// the caller last rendered.
pub struct Dock<S: ConfigStore> {
    store: S,
    state: DockState,
}

impl<S: ConfigStore> Dock<S> {
    /// Load the dock from `store`, starting empty if nothing usable is
    /// persisted.
    pub fn open(store: S) -> Self {
        let state = store.load_or_default();
        info!(
            "dock loaded: {} shortcut(s), side {}, position {:?}",
            state.shortcuts.len(),
            state.side,
            state.window_position
        );
        Self { store, state }
    }

    /// Wrap an already loaded state.  Nothing is written until the first
    /// mutation.
    pub fn with_state(store: S, state: DockState) -> Self {
        Self { store, state }
    }

    pub fn state(&self) -> &DockState {
        &self.state
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.state.shortcuts
    }

    pub fn side(&self) -> Side {
        self.state.side
    }

    pub fn window_position(&self) -> Option<Position> {
        self.state.window_position
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a shortcut.
    ///
    /// Returns `false` without touching anything when `name` or `path` is
    /// empty.
    pub fn add_shortcut(&mut self, name: &str, path: &str) -> bool {
        if name.is_empty() || path.is_empty() {
            debug!("ignoring incomplete shortcut (name {:?}, path {:?})", name, path);
            return false;
        }
        self.state.shortcuts.push(Shortcut::new(name, path));
        info!("added shortcut {:?} -> {}", name, path);
        self.persist();
        true
    }

    /// Remove the shortcut at `index` and return it.
    pub fn remove_shortcut(&mut self, index: usize) -> Result<Shortcut, DockError> {
        let len = self.state.shortcuts.len();
        if index >= len {
            return Err(DockError::IndexOutOfRange { index, len });
        }
        let removed = self.state.shortcuts.remove(index);
        info!("removed shortcut {} ({:?})", index, removed.name);
        self.persist();
        Ok(removed)
    }

    /// Flip the side and return the new one.
    pub fn toggle_side(&mut self) -> Side {
        self.state.side = self.state.side.toggled();
        info!("side is now {}", self.state.side);
        self.persist();
        self.state.side
    }

    /// Record the window's top-left corner.
    pub fn set_window_position(&mut self, x: i32, y: i32) {
        self.state.window_position = Some(Position::new(x, y));
        debug!("window position ({}, {})", x, y);
        self.persist();
    }

    /// Look up a shortcut without side effects.
    pub fn resolve_shortcut(&self, index: usize) -> Result<&Shortcut, DockError> {
        self.state
            .shortcuts
            .get(index)
            .ok_or(DockError::IndexOutOfRange {
                index,
                len: self.state.shortcuts.len(),
            })
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            error!("failed to save dock state: {}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    //  Recording store

    /// A test double that keeps every saved snapshot.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        pub initial: Option<DockState>,
        pub saves: RefCell<Vec<DockState>>,
        pub fail_writes: bool,
    }

    #[derive(Debug, thiserror::Error)]
    pub(crate) enum MemoryStoreError {
        #[error("nothing stored")]
        Empty,
        #[error("disk full")]
        Full,
    }

    impl ConfigStore for MemoryStore {
        type Error = MemoryStoreError;

        fn load(&self) -> Result<DockState, MemoryStoreError> {
            self.saves
                .borrow()
                .last()
                .cloned()
                .or_else(|| self.initial.clone())
                .ok_or(MemoryStoreError::Empty)
        }

        fn save(&self, state: &DockState) -> Result<(), MemoryStoreError> {
            if self.fail_writes {
                return Err(MemoryStoreError::Full);
            }
            self.saves.borrow_mut().push(state.clone());
            Ok(())
        }
    }

    fn dock_with(names: &[&str]) -> Dock<MemoryStore> {
        let state = DockState {
            shortcuts: names
                .iter()
                .map(|n| Shortcut::new(*n, format!("/bin/{}", n)))
                .collect(),
            ..DockState::default()
        };
        Dock::with_state(MemoryStore::default(), state)
    }

    #[test]
    fn open_empty_store_gives_default() {
        let dock = Dock::open(MemoryStore::default());
        assert!(dock.shortcuts().is_empty());
        assert_eq!(dock.side(), Side::Right);
        assert_eq!(dock.window_position(), None);
        assert!(dock.store().saves.borrow().is_empty());
    }

    #[test]
    fn open_uses_persisted_state() {
        let persisted = DockState {
            shortcuts: vec![Shortcut::new("A", "/a")],
            side: Side::Left,
            window_position: Some(Position::new(5, 6)),
        };
        let store = MemoryStore {
            initial: Some(persisted.clone()),
            ..MemoryStore::default()
        };
        let dock = Dock::open(store);
        assert_eq!(dock.state(), &persisted);
    }

    #[test]
    fn add_appends_and_persists() {
        let mut dock = dock_with(&["a"]);
        assert!(dock.add_shortcut("Game", "/g"));
        assert_eq!(dock.shortcuts().last(), Some(&Shortcut::new("Game", "/g")));
        let saves = dock.store().saves.borrow();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].shortcuts.len(), 2);
    }

    #[test]
    fn add_with_empty_field_is_noop() {
        let mut dock = dock_with(&[]);
        assert!(!dock.add_shortcut("", "/x"));
        assert!(!dock.add_shortcut("X", ""));
        assert!(dock.shortcuts().is_empty());
        assert!(dock.store().saves.borrow().is_empty());
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut dock = dock_with(&[]);
        assert!(dock.add_shortcut("Same", "/s"));
        assert!(dock.add_shortcut("Same", "/s"));
        assert_eq!(dock.shortcuts().len(), 2);
    }

    #[test]
    fn add_then_remove_leaves_empty() {
        let mut dock = dock_with(&[]);
        dock.add_shortcut("Game", "/g");
        let removed = dock.remove_shortcut(0).unwrap();
        assert_eq!(removed, Shortcut::new("Game", "/g"));
        assert!(dock.shortcuts().is_empty());
        let saves = dock.store().saves.borrow();
        assert_eq!(saves.len(), 2);
        assert!(saves[1].shortcuts.is_empty());
    }

    #[test]
    fn remove_middle_keeps_relative_order() {
        let mut dock = dock_with(&["zero", "one", "two"]);
        dock.remove_shortcut(1).unwrap();
        let names: Vec<&str> = dock.shortcuts().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zero", "two"]);
        assert_eq!(dock.resolve_shortcut(1).unwrap().name, "two");
    }

    #[test]
    fn remove_out_of_range_is_error_without_write() {
        let mut dock = dock_with(&["a", "b"]);
        assert_eq!(
            dock.remove_shortcut(2),
            Err(DockError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(dock.shortcuts().len(), 2);
        assert!(dock.store().saves.borrow().is_empty());
    }

    #[test]
    fn toggle_twice_persists_each_step() {
        let mut dock = dock_with(&[]);
        assert_eq!(dock.toggle_side(), Side::Left);
        assert_eq!(dock.toggle_side(), Side::Right);
        let saves = dock.store().saves.borrow();
        let sides: Vec<Side> = saves.iter().map(|s| s.side).collect();
        assert_eq!(sides, vec![Side::Left, Side::Right]);
    }

    #[test]
    fn set_position_overwrites_and_persists() {
        let mut dock = dock_with(&[]);
        dock.set_window_position(10, 20);
        dock.set_window_position(-3, 40);
        assert_eq!(dock.window_position(), Some(Position::new(-3, 40)));
        let saves = dock.store().saves.borrow();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[1].window_position, Some(Position::new(-3, 40)));
    }

    #[test]
    fn resolve_does_not_persist() {
        let dock = dock_with(&["a"]);
        assert_eq!(dock.resolve_shortcut(0).unwrap().path, "/bin/a");
        assert!(dock.resolve_shortcut(1).is_err());
        assert!(dock.store().saves.borrow().is_empty());
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };
        let mut dock = Dock::with_state(store, DockState::default());
        assert!(dock.add_shortcut("A", "/a"));
        assert_eq!(dock.toggle_side(), Side::Left);
        assert_eq!(dock.shortcuts().len(), 1);
    }

    #[test]
    fn end_to_end_with_json_file() {
        use crate::store::JsonConfigStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dock_config.json");
        let mut dock = Dock::open(JsonConfigStore::new(&path));
        assert_eq!(dock.state(), &DockState::default());

        dock.add_shortcut("Notes", "/home/notes.txt");
        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            serde_json::json!({
                "side": "right",
                "apps": [ { "name": "Notes", "path": "/home/notes.txt" } ]
            })
        );

        dock.toggle_side();
        dock.set_window_position(12, 34);
        let reopened = Dock::open(JsonConfigStore::new(&path));
        assert_eq!(reopened.state(), dock.state());
    }
}
