use tracing::{debug, info, warn};

use super::creators::{CreatorRegistry, WindowCreator};
use super::types::{
    Bounds, INITIAL_Z_INDEX, MAX_Z_INDEX, MIN_HEIGHT, MIN_WIDTH, Viewport, Window, WindowSpec,
    WindowUpdate,
};
use crate::errors::log_desktop_error;
use crate::persistence::{PersistedState, STATE_KEY, StateStorage, decode_state};

/// Sole owner of the desktop's window registry.
///
/// Windows are kept in creation order; paint order comes from `z_index`.
/// Every mutation is written through to the configured [`StateStorage`].
/// Operations on an unknown id are silent no-ops, and storage failures are
/// logged and swallowed, so nothing here returns an error.
pub struct WindowManager {
    windows: Vec<Window>,
    active_window_id: Option<String>,
    z_index_counter: u64,
    creators: CreatorRegistry,
    storage: Box<dyn StateStorage>,
    viewport: Option<Viewport>,
    restoring: bool,
}

impl WindowManager {
    pub fn new(storage: impl StateStorage + 'static) -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            z_index_counter: INITIAL_Z_INDEX,
            creators: CreatorRegistry::new(),
            storage: Box::new(storage),
            viewport: None,
            restoring: false,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Update the size maximized windows fill. Already-maximized windows keep
    /// their current geometry until toggled.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or(Viewport::FALLBACK)
    }

    // ------------------------------------------------------------------
    // Read views
    // ------------------------------------------------------------------

    /// All windows in creation order.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn window(&self, window_id: &str) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn active_window_id(&self) -> Option<&str> {
        self.active_window_id.as_deref()
    }

    /// Windows that are not minimized, in creation order.
    pub fn visible_windows(&self) -> Vec<&Window> {
        self.windows.iter().filter(|w| w.is_visible()).collect()
    }

    /// The visible window painted on top, if any.
    pub fn top_visible_window(&self) -> Option<&Window> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
    }

    pub fn z_index_counter(&self) -> u64 {
        self.z_index_counter
    }

    pub fn creators(&self) -> &CreatorRegistry {
        &self.creators
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Open a window and make it active, returning its id.
    ///
    /// If a window with the same id is already open it is focused instead;
    /// the registry never holds two windows with one id.
    pub fn create_window(&mut self, spec: WindowSpec) -> String {
        let window_id = match spec.id {
            Some(id) if !id.is_empty() => id,
            _ => self.derive_window_id(),
        };

        if self.position(&window_id).is_some() {
            debug!(
                event = "core.window.create_focused_existing",
                window_id = %window_id
            );
            self.focus_window(&window_id);
            return window_id;
        }

        let z_index = self.next_z_index();
        self.windows.push(Window {
            id: window_id.clone(),
            title: spec.title,
            content: spec.content,
            x: spec.x,
            y: spec.y,
            width: spec.width,
            height: spec.height,
            z_index,
            is_minimized: false,
            is_maximized: false,
            original_bounds: None,
        });
        self.active_window_id = Some(window_id.clone());

        info!(
            event = "core.window.created",
            window_id = %window_id,
            z_index = z_index,
            count = self.windows.len()
        );

        self.save_window_state();
        window_id
    }

    /// Remove a window. If it was active, the topmost visible window that
    /// remains becomes active.
    pub fn close_window(&mut self, window_id: &str) {
        let Some(index) = self.position(window_id) else {
            debug!(
                event = "core.window.close_skipped",
                window_id = %window_id,
                reason = "not found"
            );
            return;
        };

        self.windows.remove(index);
        if self.active_window_id.as_deref() == Some(window_id) {
            self.active_window_id = self.top_visible_window().map(|w| w.id.clone());
        }

        info!(
            event = "core.window.closed",
            window_id = %window_id,
            active_window_id = ?self.active_window_id,
            count = self.windows.len()
        );

        self.save_window_state();
    }

    /// Bring a window to the front, un-minimizing it, and make it active.
    pub fn focus_window(&mut self, window_id: &str) {
        let Some(index) = self.position(window_id) else {
            debug!(
                event = "core.window.focus_skipped",
                window_id = %window_id,
                reason = "not found"
            );
            return;
        };

        let z_index = self.next_z_index();
        let window = &mut self.windows[index];
        window.is_minimized = false;
        window.z_index = z_index;
        self.active_window_id = Some(window_id.to_string());

        debug!(event = "core.window.focused", window_id = %window_id, z_index = z_index);

        self.save_window_state();
    }

    /// Hide a window. If it was active, the topmost visible window takes
    /// over, or nothing is active.
    ///
    /// A maximized window stays flagged as maximized, so focusing it again
    /// brings it back full-screen.
    pub fn minimize_window(&mut self, window_id: &str) {
        let Some(index) = self.position(window_id) else {
            debug!(
                event = "core.window.minimize_skipped",
                window_id = %window_id,
                reason = "not found"
            );
            return;
        };

        self.windows[index].is_minimized = true;
        if self.active_window_id.as_deref() == Some(window_id) {
            self.active_window_id = self.top_visible_window().map(|w| w.id.clone());
        }

        debug!(
            event = "core.window.minimized",
            window_id = %window_id,
            active_window_id = ?self.active_window_id
        );

        self.save_window_state();
    }

    /// Toggle between full-viewport and the geometry saved at maximize time,
    /// then focus the window.
    pub fn maximize_window(&mut self, window_id: &str) {
        let Some(index) = self.position(window_id) else {
            debug!(
                event = "core.window.maximize_skipped",
                window_id = %window_id,
                reason = "not found"
            );
            return;
        };

        let viewport = self.viewport();
        let window = &mut self.windows[index];

        if window.is_maximized {
            if let Some(bounds) = window.original_bounds.take() {
                window.set_bounds(bounds);
            }
            window.is_maximized = false;
            debug!(event = "core.window.restored", window_id = %window_id);
        } else {
            window.original_bounds = Some(window.bounds());
            window.set_bounds(Bounds {
                x: 0,
                y: 0,
                width: viewport.width,
                height: viewport.height,
            });
            window.is_maximized = true;
            debug!(
                event = "core.window.maximized",
                window_id = %window_id,
                width = viewport.width,
                height = viewport.height
            );
        }

        self.focus_window(window_id);
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Move a window's top-left corner. Positions are not clamped to the
    /// viewport. Maximized windows do not move.
    pub fn move_window(&mut self, window_id: &str, x: i32, y: i32) {
        let Some(window) = self.unlocked_window_mut(window_id, "move") else {
            return;
        };

        window.x = x;
        window.y = y;

        debug!(event = "core.window.moved", window_id = %window_id, x = x, y = y);

        self.save_window_state();
    }

    /// Resize a window, raising the size to at least
    /// [`MIN_WIDTH`]x[`MIN_HEIGHT`]. Maximized windows do not resize.
    pub fn resize_window(&mut self, window_id: &str, width: u32, height: u32) {
        let Some(window) = self.unlocked_window_mut(window_id, "resize") else {
            return;
        };

        window.width = width.max(MIN_WIDTH);
        window.height = height.max(MIN_HEIGHT);

        debug!(
            event = "core.window.resized",
            window_id = %window_id,
            width = window.width,
            height = window.height
        );

        self.save_window_state();
    }

    /// Apply the fields present in `update`.
    pub fn update_window_content(&mut self, window_id: &str, update: WindowUpdate) {
        let Some(index) = self.position(window_id) else {
            debug!(
                event = "core.window.update_skipped",
                window_id = %window_id,
                reason = "not found"
            );
            return;
        };

        let window = &mut self.windows[index];
        if let Some(title) = update.title {
            window.title = title;
        }
        if let Some(content) = update.content {
            window.content = content;
        }
        if let Some(width) = update.width {
            window.width = width;
        }
        if let Some(height) = update.height {
            window.height = height;
        }

        debug!(event = "core.window.updated", window_id = %window_id);

        self.save_window_state();
    }

    // ------------------------------------------------------------------
    // Creators and persistence
    // ------------------------------------------------------------------

    /// Register how to rebuild the window with this id after a reload.
    pub fn register_window_creator(
        &mut self,
        window_id: impl Into<String>,
        creator: impl WindowCreator + 'static,
    ) {
        self.creators.register(window_id, Box::new(creator));
    }

    /// Write the registry to storage. Failures are logged, never returned.
    pub fn save_window_state(&self) {
        if self.restoring {
            return;
        }

        let state = PersistedState::capture(
            &self.windows,
            self.active_window_id.as_deref(),
            self.z_index_counter,
        );

        let result = state
            .encode()
            .and_then(|json| self.storage.write(STATE_KEY, &json));

        if let Err(e) = result {
            log_desktop_error(
                "core.window.state_save_failed",
                &e,
                "Window state not persisted - it will be lost on reload",
            );
        }
    }

    /// Rebuild saved windows through their registered creators.
    ///
    /// Missing, unreadable, or malformed state leaves the registry as it is.
    /// Windows without a registered creator are skipped with a warning.
    pub fn load_window_state(&mut self) {
        let raw = match self.storage.read(STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(event = "core.window.state_load_skipped", reason = "no saved state");
                return;
            }
            Err(e) => {
                log_desktop_error(
                    "core.window.state_load_failed",
                    &e,
                    "Saved window state is unreadable - starting with an empty desktop",
                );
                return;
            }
        };

        match decode_state(&raw) {
            Ok(state) => self.restore(state),
            Err(e) => log_desktop_error(
                "core.window.state_load_failed",
                &e,
                "Saved window state is corrupt - starting with an empty desktop",
            ),
        }
    }

    /// Delete the saved state. The live registry is untouched.
    pub fn clear_window_state(&self) {
        match self.storage.remove(STATE_KEY) {
            Ok(()) => info!(event = "core.window.state_cleared"),
            Err(e) => log_desktop_error(
                "core.window.state_clear_failed",
                &e,
                "Saved window state could not be removed",
            ),
        }
    }

    fn restore(&mut self, state: PersistedState) {
        info!(
            event = "core.window.state_restore_started",
            saved_count = state.windows.len()
        );

        self.restoring = true;
        self.z_index_counter = self.z_index_counter.max(state.z_index_counter);

        let mut restored = 0usize;
        let mut skipped = 0usize;

        for saved in &state.windows {
            let Some(spec) = self.creators.get(&saved.id).map(|c| c.build()) else {
                warn!(
                    event = "core.window.restore_skipped",
                    window_id = %saved.id,
                    reason = "no creator registered"
                );
                skipped += 1;
                continue;
            };

            if spec.id.as_deref() != Some(saved.id.as_str()) {
                warn!(
                    event = "core.window.restore_skipped",
                    window_id = %saved.id,
                    built_id = ?spec.id,
                    reason = "creator built a window with a different id"
                );
                skipped += 1;
                continue;
            }

            self.create_window(spec);

            if let Some(window) = self.windows.iter_mut().find(|w| w.id == saved.id) {
                saved.apply_to(window);
                restored += 1;
            }
        }

        if let Some(highest) = self.windows.iter().map(|w| w.z_index).max() {
            self.z_index_counter = self.z_index_counter.max(highest);
        }

        let saved_active = state
            .active_window_id
            .filter(|id| self.window(id).is_some_and(Window::is_visible));
        self.active_window_id =
            saved_active.or_else(|| self.top_visible_window().map(|w| w.id.clone()));

        self.restoring = false;

        info!(
            event = "core.window.state_restore_completed",
            restored = restored,
            skipped = skipped,
            active_window_id = ?self.active_window_id
        );

        self.save_window_state();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn position(&self, window_id: &str) -> Option<usize> {
        self.windows.iter().position(|w| w.id == window_id)
    }

    fn next_z_index(&mut self) -> u64 {
        let next = self
            .z_index_counter
            .checked_add(1)
            .filter(|z| *z <= MAX_Z_INDEX);

        match next {
            Some(z) => self.z_index_counter = z,
            None => {
                self.compact_z_indices();
                self.z_index_counter += 1;
            }
        }
        self.z_index_counter
    }

    /// Renumber every window from `INITIAL_Z_INDEX + 1` upward, keeping the
    /// current stacking order. Runs only when the counter reaches
    /// [`MAX_Z_INDEX`].
    fn compact_z_indices(&mut self) {
        let mut order: Vec<usize> = (0..self.windows.len()).collect();
        order.sort_by_key(|&i| (self.windows[i].z_index, i));

        let mut z = INITIAL_Z_INDEX;
        for i in order {
            z += 1;
            self.windows[i].z_index = z;
        }

        warn!(
            event = "core.window.z_index_compacted",
            previous_counter = self.z_index_counter,
            counter = z,
            window_count = self.windows.len()
        );
        self.z_index_counter = z;
    }

    /// The window, unless it is missing or its geometry is locked by
    /// maximize.
    fn unlocked_window_mut(
        &mut self,
        window_id: &str,
        action: &'static str,
    ) -> Option<&mut Window> {
        let Some(window) = self.windows.iter_mut().find(|w| w.id == window_id) else {
            debug!(
                event = "core.window.geometry_skipped",
                window_id = %window_id,
                action = action,
                reason = "not found"
            );
            return None;
        };

        if window.is_maximized {
            debug!(
                event = "core.window.geometry_skipped",
                window_id = %window_id,
                action = action,
                reason = "maximized"
            );
            return None;
        }

        Some(window)
    }

    fn derive_window_id(&self) -> String {
        let base = format!("window-{}", chrono::Utc::now().timestamp_millis());
        if self.position(&base).is_none() {
            return base;
        }

        let mut suffix = 1u32;
        loop {
            let candidate = format!("{}-{}", base, suffix);
            if self.position(&candidate).is_none() {
                return candidate;
            }
            suffix += 1;
        }
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.windows)
            .field("active_window_id", &self.active_window_id)
            .field("z_index_counter", &self.z_index_counter)
            .field("creators", &self.creators)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStorage, PersistenceError};
    use crate::window::types::WindowContent;

    fn manager() -> WindowManager {
        WindowManager::new(MemoryStorage::new())
    }

    fn spec(id: &str) -> WindowSpec {
        WindowSpec::new(id.to_uppercase(), WindowContent::component(id)).with_id(id)
    }

    fn calculator() -> WindowSpec {
        WindowSpec::new("Calculator", WindowContent::component("Calculator"))
            .with_id("calc")
            .with_size(200, 250)
            .with_position(200, 150)
    }

    struct FailingStorage;

    impl StateStorage for FailingStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::ReadFailed {
                path: "nowhere".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
            })
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::WriteFailed {
                path: "nowhere".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded"),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::RemoveFailed {
                path: "nowhere".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
            })
        }
    }

    #[test]
    fn test_create_uses_defaults_and_activates() {
        let mut wm = manager();
        let id = wm.create_window(
            WindowSpec::new("Hello", WindowContent::markup("<p>hi</p>")).with_id("hello"),
        );

        assert_eq!(id, "hello");
        let w = wm.window("hello").unwrap();
        assert_eq!(
            w.bounds(),
            Bounds {
                x: 100,
                y: 100,
                width: 400,
                height: 300
            }
        );
        assert_eq!(w.z_index, INITIAL_Z_INDEX + 1);
        assert!(!w.is_minimized && !w.is_maximized);
        assert!(w.original_bounds.is_none());
        assert_eq!(wm.active_window_id(), Some("hello"));
    }

    #[test]
    fn test_distinct_creates_have_strictly_increasing_z() {
        let mut wm = manager();
        for id in ["a", "b", "c", "d"] {
            wm.create_window(spec(id));
        }

        assert_eq!(wm.windows().len(), 4);
        let z: Vec<u64> = wm.windows().iter().map(|w| w.z_index).collect();
        assert!(z.windows(2).all(|pair| pair[0] < pair[1]), "z = {z:?}");
    }

    #[test]
    fn test_duplicate_create_focuses_existing() {
        let mut wm = manager();
        wm.create_window(calculator());
        let first_z = wm.window("calc").unwrap().z_index;
        wm.create_window(spec("other"));

        let id = wm.create_window(calculator());

        assert_eq!(id, "calc");
        assert_eq!(wm.windows().len(), 2);
        assert_eq!(wm.active_window_id(), Some("calc"));
        let calc = wm.window("calc").unwrap();
        assert!(calc.z_index > first_z);
        assert!(calc.z_index > wm.window("other").unwrap().z_index);
    }

    #[test]
    fn test_duplicate_create_does_not_replace_content() {
        let mut wm = manager();
        wm.create_window(calculator());
        wm.create_window(
            WindowSpec::new("Other title", WindowContent::markup("x")).with_id("calc"),
        );
        assert_eq!(wm.window("calc").unwrap().title, "Calculator");
    }

    #[test]
    fn test_create_without_id_derives_unique_ids() {
        let mut wm = manager();
        let a = wm.create_window(WindowSpec::new("A", WindowContent::markup("a")));
        let b = wm.create_window(WindowSpec::new("B", WindowContent::markup("b")).with_id(""));

        assert!(a.starts_with("window-"));
        assert!(b.starts_with("window-"));
        assert_ne!(a, b);
        assert_eq!(wm.windows().len(), 2);
    }

    #[test]
    fn test_close_absent_is_noop() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        let before = wm.windows().to_vec();

        wm.close_window("missing");

        assert_eq!(wm.windows(), before.as_slice());
        assert_eq!(wm.active_window_id(), Some("a"));
    }

    #[test]
    fn test_close_active_falls_back_to_top_visible() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.create_window(spec("b"));
        wm.create_window(spec("c"));
        wm.focus_window("a");

        wm.close_window("a");
        assert_eq!(wm.active_window_id(), Some("c"));

        wm.close_window("c");
        wm.close_window("b");
        assert_eq!(wm.active_window_id(), None);
        assert!(wm.windows().is_empty());
    }

    #[test]
    fn test_close_active_skips_minimized() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.create_window(spec("b"));
        wm.create_window(spec("c"));
        wm.minimize_window("c");
        wm.focus_window("a");

        wm.close_window("a");
        assert_eq!(wm.active_window_id(), Some("b"));
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.create_window(spec("b"));

        wm.close_window("a");
        assert_eq!(wm.active_window_id(), Some("b"));
    }

    #[test]
    fn test_focus_unknown_does_not_touch_counter() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        let counter = wm.z_index_counter();

        wm.focus_window("ghost");
        assert_eq!(wm.z_index_counter(), counter);
    }

    #[test]
    fn test_minimize_then_focus_restores() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.create_window(spec("b"));

        wm.minimize_window("a");
        assert!(wm.window("a").unwrap().is_minimized);

        wm.focus_window("a");
        let a = wm.window("a").unwrap();
        assert!(!a.is_minimized);
        assert_eq!(wm.active_window_id(), Some("a"));
        assert_eq!(a.z_index, wm.z_index_counter());
        assert!(a.z_index > wm.window("b").unwrap().z_index);
    }

    #[test]
    fn test_minimize_active_falls_back_by_stacking_order() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.create_window(spec("b"));
        wm.create_window(spec("c"));
        wm.focus_window("a");
        wm.focus_window("c");

        wm.minimize_window("c");
        assert_eq!(wm.active_window_id(), Some("a"));

        wm.minimize_window("a");
        assert_eq!(wm.active_window_id(), Some("b"));

        wm.minimize_window("b");
        assert_eq!(wm.active_window_id(), None);
        assert!(wm.visible_windows().is_empty());
    }

    #[test]
    fn test_minimize_inactive_keeps_active() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.create_window(spec("b"));

        wm.minimize_window("a");
        assert_eq!(wm.active_window_id(), Some("b"));
    }

    #[test]
    fn test_visible_windows_excludes_minimized() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.create_window(spec("b"));
        wm.minimize_window("a");

        let visible: Vec<&str> = wm.visible_windows().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(visible, vec!["b"]);
        assert_eq!(wm.windows().len(), 2);
    }

    #[test]
    fn test_maximize_toggle_roundtrip() {
        let mut wm = manager().with_viewport(Viewport::new(1280, 720));
        wm.create_window(calculator());
        let original = wm.window("calc").unwrap().bounds();

        wm.maximize_window("calc");
        let w = wm.window("calc").unwrap();
        assert!(w.is_maximized);
        assert_eq!(
            w.bounds(),
            Bounds {
                x: 0,
                y: 0,
                width: 1280,
                height: 720
            }
        );
        assert_eq!(w.original_bounds, Some(original));

        wm.maximize_window("calc");
        let w = wm.window("calc").unwrap();
        assert!(!w.is_maximized);
        assert_eq!(w.bounds(), original);
        assert!(w.original_bounds.is_none());
    }

    #[test]
    fn test_maximize_uses_fallback_viewport() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.maximize_window("a");
        let w = wm.window("a").unwrap();
        assert_eq!((w.width, w.height), (800, 600));
    }

    #[test]
    fn test_maximize_focuses_and_unminimizes() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.create_window(spec("b"));
        wm.minimize_window("a");

        wm.maximize_window("a");
        let a = wm.window("a").unwrap();
        assert!(!a.is_minimized);
        assert_eq!(wm.active_window_id(), Some("a"));
        assert_eq!(a.z_index, wm.z_index_counter());
    }

    #[test]
    fn test_minimize_maximized_keeps_flag() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.maximize_window("a");
        wm.minimize_window("a");

        let a = wm.window("a").unwrap();
        assert!(a.is_maximized);
        assert!(a.original_bounds.is_some());

        wm.focus_window("a");
        let a = wm.window("a").unwrap();
        assert!(a.is_maximized);
        assert_eq!((a.x, a.y, a.width, a.height), (0, 0, 800, 600));
    }

    #[test]
    fn test_move_is_unclamped() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.move_window("a", -50, 5000);
        let a = wm.window("a").unwrap();
        assert_eq!((a.x, a.y), (-50, 5000));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut wm = manager();
        wm.create_window(spec("a"));

        wm.resize_window("a", 50, 50);
        let a = wm.window("a").unwrap();
        assert_eq!((a.width, a.height), (200, 100));

        wm.resize_window("a", 5000, 4000);
        let a = wm.window("a").unwrap();
        assert_eq!((a.width, a.height), (5000, 4000));
    }

    #[test]
    fn test_geometry_locked_while_maximized() {
        let mut wm = manager();
        wm.create_window(spec("a"));
        wm.maximize_window("a");
        let locked = wm.window("a").unwrap().bounds();

        wm.move_window("a", 10, 10);
        wm.resize_window("a", 300, 300);
        assert_eq!(wm.window("a").unwrap().bounds(), locked);
    }

    #[test]
    fn test_move_and_resize_unknown_are_noops() {
        let mut wm = manager();
        wm.move_window("ghost", 1, 1);
        wm.resize_window("ghost", 300, 300);
        assert!(wm.windows().is_empty());
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut wm = manager();
        wm.create_window(calculator());

        wm.update_window_content(
            "calc",
            WindowUpdate {
                title: Some("Scientific".to_string()),
                width: Some(320),
                ..Default::default()
            },
        );

        let w = wm.window("calc").unwrap();
        assert_eq!(w.title, "Scientific");
        assert_eq!(w.width, 320);
        assert_eq!(w.height, 250);
        assert_eq!(w.content, WindowContent::component("Calculator"));
    }

    #[test]
    fn test_every_mutation_persists() {
        let storage = MemoryStorage::new();
        let mut wm = WindowManager::new(storage.clone());

        wm.create_window(spec("a"));
        let after_create = storage.get(STATE_KEY).unwrap();
        assert!(after_create.contains("\"a\""));

        wm.move_window("a", 7, 8);
        let after_move = decode_state(&storage.get(STATE_KEY).unwrap()).unwrap();
        assert_eq!((after_move.windows[0].x, after_move.windows[0].y), (7, 8));

        wm.close_window("a");
        let after_close = decode_state(&storage.get(STATE_KEY).unwrap()).unwrap();
        assert!(after_close.windows.is_empty());
        assert_eq!(after_close.active_window_id, None);
    }

    #[test]
    fn test_storage_failures_do_not_propagate() {
        let mut wm = WindowManager::new(FailingStorage);
        wm.create_window(spec("a"));
        wm.minimize_window("a");
        wm.load_window_state();
        wm.clear_window_state();

        assert_eq!(wm.windows().len(), 1);
        assert!(wm.window("a").unwrap().is_minimized);
    }

    #[test]
    fn test_clear_window_state_keeps_registry() {
        let storage = MemoryStorage::new();
        let mut wm = WindowManager::new(storage.clone());
        wm.create_window(spec("a"));

        wm.clear_window_state();
        assert!(storage.get(STATE_KEY).is_none());
        assert_eq!(wm.windows().len(), 1);
    }

    #[test]
    fn test_load_corrupt_state_leaves_empty_registry() {
        let storage = MemoryStorage::new();
        storage.write(STATE_KEY, "{{{{ not json").unwrap();

        let mut wm = WindowManager::new(storage);
        wm.register_window_creator("a", || spec("a"));
        wm.load_window_state();

        assert!(wm.windows().is_empty());
        assert_eq!(wm.active_window_id(), None);
    }

    #[test]
    fn test_load_skips_windows_without_creator() {
        let storage = MemoryStorage::new();
        {
            let mut wm = WindowManager::new(storage.clone());
            wm.create_window(spec("known"));
            wm.create_window(spec("unknown"));
        }

        let mut wm = WindowManager::new(storage);
        wm.register_window_creator("known", || spec("known"));
        wm.load_window_state();

        assert_eq!(wm.windows().len(), 1);
        assert_eq!(wm.windows()[0].id, "known");
        assert_eq!(wm.active_window_id(), Some("known"));
    }

    #[test]
    fn test_restore_keeps_counter_above_restored_windows() {
        let storage = MemoryStorage::new();
        {
            let mut wm = WindowManager::new(storage.clone());
            wm.create_window(spec("a"));
            wm.create_window(spec("b"));
            wm.focus_window("a");
            wm.focus_window("b");
        }

        let mut wm = WindowManager::new(storage);
        wm.register_window_creator("a", || spec("a"));
        wm.register_window_creator("b", || spec("b"));
        wm.load_window_state();

        let highest = wm.windows().iter().map(|w| w.z_index).max().unwrap();
        assert!(wm.z_index_counter() >= highest);

        wm.focus_window("a");
        assert!(wm.window("a").unwrap().z_index > highest);
    }

    #[test]
    fn test_load_out_of_range_counter_then_create() {
        let storage = MemoryStorage::new();
        storage
            .write(
                STATE_KEY,
                r#"{"windows":[],"activeWindowId":null,"zIndexCounter":18446744073709551615}"#,
            )
            .unwrap();

        let mut wm = WindowManager::new(storage);
        wm.load_window_state();
        wm.create_window(spec("a"));

        assert_eq!(wm.window("a").unwrap().z_index, INITIAL_Z_INDEX + 1);
    }

    #[test]
    fn test_counter_at_ceiling_compacts_and_keeps_order() {
        let storage = MemoryStorage::new();
        storage
            .write(
                STATE_KEY,
                &format!(
                    r#"{{"windows":[
                        {{"id":"low","title":"Low","width":400,"height":300,"x":0,"y":0,
                          "zIndex":1001,"isMinimized":false,"isMaximized":false,
                          "originalBounds":null,"contentType":"component","contentData":"low"}},
                        {{"id":"high","title":"High","width":400,"height":300,"x":0,"y":0,
                          "zIndex":18446744073709551615,"isMinimized":false,"isMaximized":false,
                          "originalBounds":null,"contentType":"component","contentData":"high"}}
                    ],"activeWindowId":"high","zIndexCounter":{}}}"#,
                    MAX_Z_INDEX
                ),
            )
            .unwrap();

        let mut wm = WindowManager::new(storage);
        wm.register_window_creator("low", || spec("low"));
        wm.register_window_creator("high", || spec("high"));
        wm.load_window_state();
        assert_eq!(wm.window("high").unwrap().z_index, MAX_Z_INDEX);

        wm.create_window(spec("new"));

        let low = wm.window("low").unwrap().z_index;
        let high = wm.window("high").unwrap().z_index;
        let new = wm.window("new").unwrap().z_index;
        assert!(low < high && high < new);
        assert_eq!(new, wm.z_index_counter());
        assert!(wm.z_index_counter() < MAX_Z_INDEX);
    }

    #[test]
    fn test_restore_skips_creator_with_mismatched_id() {
        let storage = MemoryStorage::new();
        {
            let mut wm = WindowManager::new(storage.clone());
            wm.create_window(spec("a"));
        }

        let mut wm = WindowManager::new(storage);
        wm.register_window_creator("a", || spec("b"));
        wm.load_window_state();

        assert!(wm.windows().is_empty());
        assert_eq!(wm.active_window_id(), None);
    }

    #[test]
    fn test_restore_does_not_write_partial_state() {
        let storage = MemoryStorage::new();
        {
            let mut wm = WindowManager::new(storage.clone());
            wm.create_window(spec("a"));
            wm.move_window("a", 333, 444);
        }
        let saved_before = decode_state(&storage.get(STATE_KEY).unwrap()).unwrap();

        let mut wm = WindowManager::new(storage.clone());
        wm.register_window_creator("a", || spec("a"));
        wm.load_window_state();

        let saved_after = decode_state(&storage.get(STATE_KEY).unwrap()).unwrap();
        assert_eq!(saved_after.windows, saved_before.windows);
        assert_eq!(wm.window("a").unwrap().bounds().x, 333);
    }
}
