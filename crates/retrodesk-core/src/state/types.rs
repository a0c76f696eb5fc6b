use crate::applets::Applet;
use crate::window::{WindowSpec, WindowUpdate};

/// Everything the rendering layer or CLI can ask the desktop to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateWindow(WindowSpec),
    OpenApplet(Applet),
    CloseWindow { id: String },
    FocusWindow { id: String },
    MinimizeWindow { id: String },
    /// Toggles between maximized and restored.
    MaximizeWindow { id: String },
    MoveWindow { id: String, x: i32, y: i32 },
    ResizeWindow { id: String, width: u32, height: u32 },
    UpdateWindow { id: String, update: WindowUpdate },
    RestoreState,
    ClearState,
}
