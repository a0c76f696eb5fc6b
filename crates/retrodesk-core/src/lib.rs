//! Core library for retrodesk.
//!
//! Owns the window registry of the simulated desktop: creation, stacking,
//! geometry, minimize/maximize, and persistence of every open window. Applet
//! content is opaque to this crate; applets only hand over a [`WindowSpec`]
//! and register a creator so their windows can be rebuilt after a reload.

pub mod applets;
pub mod errors;
pub mod logging;
pub mod persistence;
pub mod state;
pub mod window;

pub use applets::{Applet, register_builtin_applets};
pub use errors::{DesktopError, log_desktop_error};
pub use logging::init_logging;
pub use persistence::{FileStorage, MemoryStorage, PersistenceError, StateStorage};
pub use state::{Command, DesktopStore, Event, Store};
pub use window::{
    Bounds, Viewport, Window, WindowContent, WindowCreator, WindowManager, WindowSpec,
    WindowStatus, WindowUpdate,
};
