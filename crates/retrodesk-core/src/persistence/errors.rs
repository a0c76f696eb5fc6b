use crate::errors::DesktopError;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to read window state ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write window state ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove window state ({path}): {source}")]
    RemoveFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize window state: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },

    #[error("Saved window state is malformed: {source}")]
    ParseFailed {
        #[source]
        source: serde_json::Error,
    },
}

impl DesktopError for PersistenceError {
    fn error_code(&self) -> &'static str {
        match self {
            PersistenceError::ReadFailed { .. } => "STATE_READ_FAILED",
            PersistenceError::WriteFailed { .. } => "STATE_WRITE_FAILED",
            PersistenceError::RemoveFailed { .. } => "STATE_REMOVE_FAILED",
            PersistenceError::SerializeFailed { .. } => "STATE_SERIALIZE_FAILED",
            PersistenceError::ParseFailed { .. } => "STATE_PARSE_FAILED",
        }
    }
}
