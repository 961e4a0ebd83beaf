pub mod config;
pub mod error;
pub mod lock;
pub mod types;

pub use config::{AppConfig, ImapConfig};
pub use error::{ConfigError, LockError, MailboxError};
pub use lock::RunLock;
pub use types::*;
