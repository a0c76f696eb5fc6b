use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::errors::PersistenceError;
use crate::window::pixels;
use crate::window::types::{Bounds, INITIAL_Z_INDEX, MAX_Z_INDEX, Window, WindowContent};

/// Storage key holding the whole desktop record.
pub const STATE_KEY: &str = "window_manager_state";

/// How a saved window's content is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    /// `content_data` is the markup itself.
    #[serde(rename = "string")]
    Markup,
    /// `content_data` is the window id; the registered creator rebuilds it.
    #[serde(rename = "component")]
    Component,
}

/// One window as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedWindow {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "pixels::unsigned")]
    pub width: u32,
    #[serde(deserialize_with = "pixels::unsigned")]
    pub height: u32,
    #[serde(deserialize_with = "pixels::signed")]
    pub x: i32,
    #[serde(deserialize_with = "pixels::signed")]
    pub y: i32,
    /// Clamped to [`MAX_Z_INDEX`] on load.
    #[serde(deserialize_with = "pixels::z_index")]
    pub z_index: u64,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub original_bounds: Option<Bounds>,
    pub content_type: ContentType,
    pub content_data: String,
}

impl SerializedWindow {
    pub fn from_window(window: &Window) -> Self {
        let (content_type, content_data) = match &window.content {
            WindowContent::Markup { markup } => (ContentType::Markup, markup.clone()),
            WindowContent::Component { .. } => (ContentType::Component, window.id.clone()),
        };

        Self {
            id: window.id.clone(),
            title: window.title.clone(),
            width: window.width,
            height: window.height,
            x: window.x,
            y: window.y,
            z_index: window.z_index,
            is_minimized: window.is_minimized,
            is_maximized: window.is_maximized,
            original_bounds: window.original_bounds,
            content_type,
            content_data,
        }
    }

    /// Overlay saved geometry, stacking, and flags onto a freshly created
    /// window. Title and content stay as the creator built them.
    ///
    /// Keeps `original_bounds` only while maximized; a record claiming to be
    /// maximized without bounds to return to is restored as a normal window.
    pub(crate) fn apply_to(&self, window: &mut Window) {
        window.width = self.width;
        window.height = self.height;
        window.x = self.x;
        window.y = self.y;
        window.z_index = self.z_index;
        window.is_minimized = self.is_minimized;

        match (self.is_maximized, self.original_bounds) {
            (true, Some(bounds)) => {
                window.is_maximized = true;
                window.original_bounds = Some(bounds);
            }
            (true, None) => {
                warn!(
                    event = "core.persistence.maximized_without_bounds",
                    window_id = %self.id,
                    "Saved window is maximized but has no bounds to restore - restoring as normal"
                );
                window.is_maximized = false;
                window.original_bounds = None;
            }
            (false, _) => {
                window.is_maximized = false;
                window.original_bounds = None;
            }
        }
    }
}

/// The full record stored under [`STATE_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub windows: Vec<SerializedWindow>,
    pub active_window_id: Option<String>,
    pub z_index_counter: u64,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            z_index_counter: INITIAL_Z_INDEX,
        }
    }
}

impl PersistedState {
    pub fn capture(
        windows: &[Window],
        active_window_id: Option<&str>,
        z_index_counter: u64,
    ) -> Self {
        Self {
            windows: windows.iter().map(SerializedWindow::from_window).collect(),
            active_window_id: active_window_id.map(str::to_owned),
            z_index_counter,
        }
    }

    pub fn encode(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(|source| PersistenceError::SerializeFailed { source })
    }
}

/// Loosely typed outer shape, so one bad field does not discard the rest.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawState {
    windows: Vec<Value>,
    #[serde(default)]
    active_window_id: Value,
    #[serde(default)]
    z_index_counter: Value,
}

/// Parse a stored record.
///
/// The document must be JSON with a `windows` array; anything else is a
/// `ParseFailed`. Inside that, malformed window entries are skipped with a
/// warning, a non-string active id reads as none, and a counter that is
/// missing or outside `1..=MAX_Z_INDEX` reads as [`INITIAL_Z_INDEX`].
/// Fractional pixel values are rounded.
pub fn decode_state(raw: &str) -> Result<PersistedState, PersistenceError> {
    let raw_state: RawState =
        serde_json::from_str(raw).map_err(|source| PersistenceError::ParseFailed { source })?;

    let mut windows = Vec::with_capacity(raw_state.windows.len());
    for (index, value) in raw_state.windows.into_iter().enumerate() {
        match serde_json::from_value::<SerializedWindow>(value) {
            Ok(window) => windows.push(window),
            Err(e) => {
                warn!(
                    event = "core.persistence.window_record_skipped",
                    index = index,
                    error = %e,
                    "Saved window record is malformed - skipping it"
                );
            }
        }
    }

    let z_index_counter = raw_state
        .z_index_counter
        .as_f64()
        .map(f64::round)
        .filter(|counter| (1.0..=MAX_Z_INDEX as f64).contains(counter))
        .map(|counter| counter as u64)
        .unwrap_or(INITIAL_Z_INDEX);

    Ok(PersistedState {
        windows,
        active_window_id: raw_state.active_window_id.as_str().map(str::to_owned),
        z_index_counter,
    })
}
