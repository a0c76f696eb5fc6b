mod errors;
mod storage;
mod types;

pub use errors::PersistenceError;
pub use storage::{FileStorage, MemoryStorage, StateStorage, state_dir};
pub use types::{ContentType, PersistedState, STATE_KEY, SerializedWindow, decode_state};
