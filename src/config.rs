use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core_users::UserError;

/// Paths of the account databases. Defaults to the standard system files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserDbConfig {
    pub passwd_file: PathBuf,
    pub shadow_file: PathBuf,
}

impl Default for UserDbConfig {
    fn default() -> Self {
        Self {
            passwd_file: PathBuf::from("/etc/passwd"),
            shadow_file: PathBuf::from("/etc/shadow"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub userdb: UserDbConfig,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &str) -> Result<Self, UserError> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| UserError::InvalidConfig(format!("failed to read {}: {}", path, e)))?;
        let config: Config = toml::from_str(&config_str)
            .map_err(|e| UserError::InvalidConfig(format!("failed to parse {}: {}", path, e)))?;
        Ok(config)
    }
}
