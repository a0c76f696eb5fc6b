pub mod creators;
pub mod manager;
pub(crate) mod pixels;
pub mod types;

// Re-export public API
pub use creators::{CreatorRegistry, WindowCreator};
pub use manager::WindowManager;
pub use types::{
    Bounds, INITIAL_Z_INDEX, MAX_Z_INDEX, MIN_HEIGHT, MIN_WIDTH, Viewport, Window, WindowContent,
    WindowSpec, WindowStatus, WindowUpdate,
};
