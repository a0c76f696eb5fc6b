pub mod dispatch;
pub mod events;
pub mod store;
pub mod types;

pub use dispatch::DesktopStore;
pub use events::Event;
pub use store::Store;
pub use types::Command;
