use super::Result;
use crate::api::DEFAULT_BASE_URL;
use crate::display::Theme;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const APP_DIR_NAME: &str = "brickdash";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
            theme: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path(None)?,
        };

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("{}: {}", config_path.display(), e),
            })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path(None)?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: e.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        debug!(path = %config_path.display(), "config saved");
        Ok(())
    }

    /// `<dir>/config.toml` when a directory is given, otherwise
    /// `<platform config dir>/brickdash/config.toml`.
    pub fn config_file_path(dir: Option<&Path>) -> Result<PathBuf> {
        match dir {
            Some(dir) => Ok(dir.join(CONFIG_FILE_NAME)),
            None => {
                let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
                Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            }
        }
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Explicit name, then `default_profile`, then `"default"`.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn active_profile(&self, requested: Option<&str>) -> Option<&Profile> {
        self.get_profile(self.profile_name(requested))
    }

    /// Flag or environment value, then profile, then the local default.
    pub fn resolve_base_url(&self, flag: Option<&str>, requested: Option<&str>) -> String {
        if let Some(url) = flag {
            return url.to_string();
        }
        self.active_profile(requested)
            .map(|p| p.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn resolve_timeout(&self, requested: Option<&str>) -> Option<u64> {
        self.active_profile(requested)
            .and_then(|p| p.timeout_seconds)
    }

    pub fn resolve_theme(&self, flag: Option<Theme>, requested: Option<&str>) -> Theme {
        flag.or_else(|| self.active_profile(requested).and_then(|p| p.theme))
            .unwrap_or_else(Theme::detect)
    }
}
