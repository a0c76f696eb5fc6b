use std::error::Error;

#[derive(Debug)]
pub enum ConfigError {
    /// `RETRODESK_CONFIG` names a file that does not exist.
    ConfigNotFound {
        path: String,
    },
    ConfigParseError {
        path: String,
        message: String,
    },
    /// The configured viewport is smaller than a single minimum-size window.
    ViewportTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
    EmptyStateDir,
    IoError {
        path: String,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound { path } => {
                write!(f, "Desktop config not found at '{}'", path)
            }
            ConfigError::ConfigParseError { path, message } => {
                write!(f, "Desktop config '{}' is not valid TOML: {}", path, message)
            }
            ConfigError::ViewportTooSmall {
                width,
                height,
                min_width,
                min_height,
            } => write!(
                f,
                "Viewport {}x{} is smaller than the {}x{} minimum",
                width, height, min_width, min_height
            ),
            ConfigError::EmptyStateDir => {
                write!(f, "state.dir is set but empty; remove it to use the default")
            }
            ConfigError::IoError { path, source } => {
                write!(f, "Could not read desktop config '{}': {}", path, source)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}
