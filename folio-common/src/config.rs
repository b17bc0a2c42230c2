//! Bootstrap configuration loading and root folder resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The binary parses 1 and 2 with clap (`env = ...` on each argument) and
//! hands them over as [`Overrides`]. A missing TOML file is not an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5080;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "folio.db";

/// Default EmailJS REST endpoint
pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Contents of `config.toml`
///
/// Every field is optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Folder holding the database (and anything else the service writes)
    pub root_folder: Option<PathBuf>,
    /// Explicit database path, overrides `<root_folder>/folio.db`
    pub database_path: Option<PathBuf>,
    /// Directory with the compiled front end, served at `/`
    pub static_dir: Option<PathBuf>,
    pub server: ServerSection,
    pub logging: LoggingSection,
    pub admin: AdminCredentials,
    pub email: EmailSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Initial admin account, used only to seed an empty users table
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AdminCredentials {
    /// Username to seed, defaulting to `admin`
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("admin")
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// EmailJS relay settings
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub endpoint: Option<String>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    /// Optional private key ("accessToken") for strict-mode accounts
    pub private_key: Option<String>,
}

impl EmailSettings {
    /// Relay is enabled only when service, template and public key are all set
    pub fn is_enabled(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_EMAILJS_ENDPOINT)
    }

    /// Fill unset fields from `other`
    fn or(self, other: EmailSettings) -> Self {
        Self {
            endpoint: self.endpoint.or(other.endpoint),
            service_id: self.service_id.or(other.service_id),
            template_id: self.template_id.or(other.template_id),
            public_key: self.public_key.or(other.public_key),
            private_key: self.private_key.or(other.private_key),
        }
    }
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("endpoint", &self.endpoint())
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TomlConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }

    /// Pick the config file to read: the explicit path if given, otherwise
    /// the platform default when it exists
    ///
    /// `None` means "no file, use defaults". An explicit path is returned
    /// even if missing so the caller can report it.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        }
    }
}

/// Values taken from the command line or environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root_folder: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub admin: AdminCredentials,
    pub email: EmailSettings,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct FolioConfig {
    pub host: String,
    pub port: u16,
    pub root_folder: PathBuf,
    pub database_path: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub log_level: String,
    pub admin: AdminCredentials,
    pub email: EmailSettings,
}

impl FolioConfig {
    /// Merge overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: Overrides, file: TomlConfig) -> Self {
        // A root folder given on the command line also relocates the
        // database, even when the file names an explicit database path.
        let root_overridden = overrides.root_folder.is_some();
        let root_folder = overrides
            .root_folder
            .or(file.root_folder)
            .unwrap_or_else(default_root_folder);

        let database_path = match file.database_path {
            Some(path) if !root_overridden => path,
            _ => root_folder.join(DATABASE_FILE),
        };

        Self {
            host: overrides
                .host
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            root_folder,
            database_path,
            static_dir: overrides.static_dir.or(file.static_dir),
            log_level: overrides.log_level.unwrap_or(file.logging.level),
            admin: AdminCredentials {
                username: overrides.admin.username.or(file.admin.username),
                password: overrides.admin.password.or(file.admin.password),
            },
            email: overrides.email.or(file.email),
        }
    }

    /// `host:port` string for the listener; IPv6 hosts get brackets
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// `<config_dir>/folio/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("folio"))
        .unwrap_or_else(|| PathBuf::from("./folio_data"))
}
