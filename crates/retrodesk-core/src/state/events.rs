use serde::{Deserialize, Serialize};

/// A change produced by dispatching a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    WindowCreated { id: String },
    WindowFocused { id: String },
    WindowClosed { id: String },
    WindowMinimized { id: String },
    WindowMaximized { id: String },
    /// Un-maximized back to the geometry it had before.
    WindowRestored { id: String },
    WindowMoved { id: String, x: i32, y: i32 },
    WindowResized { id: String, width: u32, height: u32 },
    WindowUpdated { id: String },
    ActiveWindowChanged { id: Option<String> },
    StateRestored { window_count: usize },
    StateCleared,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::WindowCreated { id } => write!(f, "Opened '{}'", id),
            Event::WindowFocused { id } => write!(f, "Focused '{}'", id),
            Event::WindowClosed { id } => write!(f, "Closed '{}'", id),
            Event::WindowMinimized { id } => write!(f, "Minimized '{}'", id),
            Event::WindowMaximized { id } => write!(f, "Maximized '{}'", id),
            Event::WindowRestored { id } => write!(f, "Restored '{}'", id),
            Event::WindowMoved { id, x, y } => write!(f, "Moved '{}' to ({}, {})", id, x, y),
            Event::WindowResized { id, width, height } => {
                write!(f, "Resized '{}' to {}x{}", id, width, height)
            }
            Event::WindowUpdated { id } => write!(f, "Updated '{}'", id),
            Event::ActiveWindowChanged { id: Some(id) } => write!(f, "Active window: '{}'", id),
            Event::ActiveWindowChanged { id: None } => write!(f, "No active window"),
            Event::StateRestored { window_count } => {
                write!(f, "Restored {} window(s)", window_count)
            }
            Event::StateCleared => write!(f, "Cleared saved window state"),
        }
    }
}
