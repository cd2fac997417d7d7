use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service management CLI is missing or could not be executed.
    #[error("systemctl not found")]
    ToolNotFound,

    /// Either the unit directory is not writable, or the service manager asked
    /// for interactive authentication.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The unit does not exist.
    #[error("Service \"{0}\" not found")]
    NotFound(String),

    /// The service manager failed in a way that is not classified further.
    /// Carries the raw output of the tool.
    #[error("{0}")]
    Tool(String),

    /// Checking write access to a directory failed.
    #[error("Failed to check permissions of {}: {source}", path.display())]
    PermissionProbe { path: PathBuf, source: io::Error },

    /// The unit name cannot be used as a unit or file name.
    #[error("Invalid service name {0:?}")]
    InvalidName(String),

    /// Failed to set up the logger.
    #[error("Failed to set global logger")]
    LogInit(#[from] log::SetLoggerError),

    /// Generic I/O error
    #[error("I/O: {0}")]
    Io(#[from] io::Error),
}
