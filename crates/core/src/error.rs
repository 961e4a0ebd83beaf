use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[derive(Error, Debug)]
pub enum LockError {
    /// Expected condition, not a failure: another run owns the marker.
    #[error("another instance already holds the run lock")]
    AlreadyHeld,

    #[error("lock file error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum MailboxError {
    #[error("connection error: {0}")]
    Connect(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("protocol error: {0}")]
    Protocol(String),
}
