use super::events::Event;
use super::types::Command;

/// Applies commands to desktop state and reports what changed.
pub trait Store {
    type Error;

    /// Apply one command. An empty event list means the command was a no-op.
    fn dispatch(&mut self, cmd: Command) -> Result<Vec<Event>, Self::Error>;
}
