//! Loadparm: the tool's configuration file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default NetBIOS name when neither the config file nor `--option` sets one.
pub const DEFAULT_NETBIOS_NAME: &str = "LOCALDC";

/// Default workgroup when none is configured.
pub const DEFAULT_WORKGROUP: &str = "WORKGROUP";

/// Errors loading or overriding configuration.
#[derive(Debug, Error)]
pub enum LoadParmError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("malformed --option '{0}': expected KEY=VALUE")]
    MalformedOption(String),

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
}

/// Parsed configuration (the tool's smb.conf equivalent).
///
/// Loaded from a TOML file:
///
/// ```toml
/// realm = "EXAMPLE.COM"
/// workgroup = "EXAMPLE"
/// netbios_name = "DC1"
/// private_dir = "/var/lib/domtool/private"
/// machine_password = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadParm {
    pub realm: Option<String>,
    pub workgroup: Option<String>,
    pub netbios_name: Option<String>,
    pub private_dir: Option<PathBuf>,
    pub machine_password: Option<String>,
}

impl LoadParm {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, LoadParmError> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !config_path.exists() {
            if required {
                return Err(LoadParmError::NotFound(config_path));
            }
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| LoadParmError::Read {
                path: config_path.clone(),
                source,
            })?;

        toml::from_str(&contents).map_err(|source| LoadParmError::Parse {
            path: config_path,
            source,
        })
    }

    /// Returns the default config file path.
    ///
    /// Default: `~/.config/domtool/domtool.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("domtool")
            .join("domtool.toml")
    }

    /// Applies a `--option KEY=VALUE` override.
    ///
    /// Keys are matched case-insensitively and spaces may stand in for
    /// underscores, so `"netbios name=DC2"` sets `netbios_name`.
    pub fn set_option(&mut self, option: &str) -> Result<(), LoadParmError> {
        let (key, value) = option
            .split_once('=')
            .ok_or_else(|| LoadParmError::MalformedOption(option.to_string()))?;

        let key = key.trim().to_ascii_lowercase().replace(' ', "_");
        let value = value.trim().to_string();

        match key.as_str() {
            "realm" => self.realm = Some(value),
            "workgroup" => self.workgroup = Some(value),
            "netbios_name" => self.netbios_name = Some(value),
            "private_dir" => self.private_dir = Some(PathBuf::from(value)),
            "machine_password" => self.machine_password = Some(value),
            _ => return Err(LoadParmError::UnknownParameter(key)),
        }
        Ok(())
    }

    /// Returns the realm in uppercase, or an empty string if unset.
    pub fn realm(&self) -> String {
        self.realm
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_default()
    }

    /// Returns the workgroup (NetBIOS domain) in uppercase.
    pub fn workgroup(&self) -> String {
        self.workgroup
            .as_deref()
            .unwrap_or(DEFAULT_WORKGROUP)
            .to_uppercase()
    }

    /// Returns this host's NetBIOS name in uppercase.
    pub fn netbios_name(&self) -> String {
        self.netbios_name
            .as_deref()
            .unwrap_or(DEFAULT_NETBIOS_NAME)
            .to_uppercase()
    }

    /// Returns the private directory holding the directory database.
    ///
    /// Default: `~/.local/share/domtool/private`
    pub fn private_dir(&self) -> PathBuf {
        self.private_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("domtool")
                .join("private")
        })
    }

    /// Returns the URL of the local directory database.
    pub fn sam_url(&self) -> String {
        self.private_dir().join("sam.db").to_string_lossy().to_string()
    }
}
