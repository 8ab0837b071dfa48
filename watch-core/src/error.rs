use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid credentials")]
    AuthFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a user-id to display-name lookup. Never fatal for the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown user: {0}")]
    Unknown(String),

    #[error("Lookup unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, WatchError>;
