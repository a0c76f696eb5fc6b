//! Per-window-id factories used to rebuild windows after a reload.
//!
//! Window content can be a live component that cannot be serialized, so the
//! saved state only records ids. Each applet registers a creator for its id;
//! restoring a window means asking that creator for the applet's default
//! `WindowSpec` and then overlaying the saved geometry.

use std::collections::HashMap;

use tracing::debug;

use super::types::WindowSpec;

/// Builds the default window for one applet.
pub trait WindowCreator {
    fn build(&self) -> WindowSpec;
}

impl<F> WindowCreator for F
where
    F: Fn() -> WindowSpec,
{
    fn build(&self) -> WindowSpec {
        self()
    }
}

/// Creators keyed by window id. Process-local, never persisted.
#[derive(Default)]
pub struct CreatorRegistry {
    creators: HashMap<String, Box<dyn WindowCreator>>,
}

impl CreatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creator, replacing any earlier one for the same id.
    pub fn register(&mut self, window_id: impl Into<String>, creator: Box<dyn WindowCreator>) {
        let window_id = window_id.into();
        let replaced = self.creators.insert(window_id.clone(), creator).is_some();
        debug!(
            event = "core.window.creator_registered",
            window_id = %window_id,
            replaced = replaced
        );
    }

    pub fn get(&self, window_id: &str) -> Option<&dyn WindowCreator> {
        self.creators.get(window_id).map(|c| c.as_ref())
    }

    pub fn contains(&self, window_id: &str) -> bool {
        self.creators.contains_key(window_id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

impl std::fmt::Debug for CreatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatorRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
