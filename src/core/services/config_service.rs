use crate::display::Theme;
use crate::error::ConfigError;
use crate::storage::config::{Config, Profile};
use crate::utils::validation::validate_url;
use crate::AppError;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration service for managing application configuration
pub struct ConfigService {
    config: Config,
}

impl ConfigService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.config.profiles.get(name)
    }

    /// Set one validated field, creating the profile on first use
    pub fn set_profile_field(
        &mut self,
        profile: &str,
        key: &str,
        value: &str,
    ) -> Result<(), AppError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
            reason,
        };

        // Validate before touching the profile so a bad value leaves no trace.
        enum Update {
            BaseUrl(String),
            Timeout(u64),
            Theme(Theme),
        }
        let update = match key {
            "base_url" => {
                validate_url(value).map_err(|e| invalid(e.to_string()))?;
                Update::BaseUrl(value.trim_end_matches('/').to_string())
            }
            "timeout_seconds" => match value.parse::<u64>() {
                Ok(0) => return Err(invalid("timeout must be positive".to_string()).into()),
                Ok(secs) => Update::Timeout(secs),
                Err(e) => return Err(invalid(e.to_string()).into()),
            },
            "theme" => Update::Theme(Theme::from_str(value).map_err(invalid)?),
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                }
                .into());
            }
        };

        let entry = self
            .config
            .profiles
            .entry(profile.to_string())
            .or_default();
        match update {
            Update::BaseUrl(url) => entry.base_url = url,
            Update::Timeout(secs) => entry.timeout_seconds = Some(secs),
            Update::Theme(theme) => entry.theme = Some(theme),
        }

        if self.config.default_profile.is_none() {
            self.config.default_profile = Some(profile.to_string());
        }

        Ok(())
    }

    /// Human-readable listing for `config show`
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "default_profile = {}",
            self.config.default_profile.as_deref().unwrap_or("(none)")
        )];

        let mut names: Vec<&String> = self.config.profiles.keys().collect();
        names.sort();
        for name in names {
            let Some(profile) = self.config.profiles.get(name) else {
                continue;
            };
            lines.push(format!("[{}]", name));
            lines.push(format!("  base_url = {}", profile.base_url));
            if let Some(secs) = profile.timeout_seconds {
                lines.push(format!("  timeout_seconds = {}", secs));
            }
            if let Some(theme) = profile.theme {
                lines.push(format!("  theme = {}", theme));
            }
        }

        lines
    }

    pub fn save_config(&self, path: Option<PathBuf>) -> Result<(), AppError> {
        self.config.save(path).map_err(|e| e.into())
    }
}
