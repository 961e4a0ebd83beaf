use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_IMAP_HOST: &str = "imap.gmail.com";
pub const DEFAULT_IMAP_PORT: u16 = 993;

/// Mail store credentials, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct ImapConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub tls: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub imap: ImapConfig,
    /// Marker whose presence means "a run is active".
    pub lock_path: PathBuf,
}

impl AppConfig {
    /// Build the configuration from the environment. Missing credentials
    /// are fatal here, before anything touches the network.
    pub fn from_env() -> Result<Self, ConfigError> {
        let user = require("IMAP_USER")?;
        let pass = require("IMAP_PASS")?;

        let host = env::var("IMAP_HOST").unwrap_or_else(|_| DEFAULT_IMAP_HOST.to_string());
        let port = match env::var("IMAP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("IMAP_PORT", raw.clone()))?,
            Err(_) => DEFAULT_IMAP_PORT,
        };
        let tls = match env::var("IMAP_TLS") {
            Ok(v) => v != "0" && !v.eq_ignore_ascii_case("false"),
            Err(_) => true,
        };

        let lock_path = env::var("FOYERBOT_LOCK_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("foyerbot.lock"));

        Ok(Self {
            imap: ImapConfig {
                host,
                port,
                user,
                pass,
                tls,
            },
            lock_path,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}
