//! # bnd-config
//!
//! Storage roots and session rules for bnd, merged by figment from (later
//! wins):
//!
//! 1. built-in defaults
//! 2. `~/.config/bnd/config.toml`
//! 3. `.bnd/config.toml` in the working directory
//! 4. `BND_*` environment variables, `__` between section and key
//!    (`BND_PATHS__REMOTE` sets `paths.remote`)
//!
//! ```no_run
//! use bnd_config::BndConfig;
//!
//! let config = BndConfig::load_with_dotenv().expect("config");
//! if config.paths.is_configured() {
//!     println!("local root: {}", config.paths.local.display());
//! }
//! ```

mod error;
mod paths;

pub use bnd_core::SessionRules;
pub use error::ConfigError;
pub use paths::{PathsConfig, StorageSide};

use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Project-level config file, relative to the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".bnd/config.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "BND_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BndConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub rules: SessionRules,
}

impl BndConfig {
    /// Merge every source and check the rules.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] for unreadable or mistyped sources,
    /// [`ConfigError::InvalidValue`] for rules no session could satisfy.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.check_rules()?;
        Ok(config)
    }

    /// Export `.env` from the working directory or a parent first, then
    /// [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`]. A missing `.env` is not an error.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::load()
    }

    /// The provider chain, exposed so tests can extract from it directly.
    #[must_use]
    pub fn figment() -> Figment {
        let files = Self::global_config_path()
            .into_iter()
            .chain([PathBuf::from(PROJECT_CONFIG_FILE)]);

        files
            .filter(|path| path.exists())
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject rule values no session could satisfy.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the offending field.
    pub fn check_rules(&self) -> Result<(), ConfigError> {
        if self.rules.device_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rules.device_count".to_string(),
                reason: "at least one device records event logs".to_string(),
            });
        }
        if let Some(bad) = self
            .rules
            .extensions_to_rename_and_upload
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(ConfigError::InvalidValue {
                field: "rules.extensions_to_rename_and_upload".to_string(),
                reason: format!("'{bad}' must be a dot followed by an extension"),
            });
        }
        Ok(())
    }

    /// `<config dir>/bnd/config.toml`, if the platform has a config dir.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bnd").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = BndConfig::default();
        assert!(!config.paths.is_configured());
        assert_eq!(config.rules.device_count, 2);
    }

    #[test]
    fn rules_without_leading_dot_are_rejected() {
        let mut config = BndConfig::default();
        config.rules.extensions_to_rename_and_upload = vec!["txt".to_string()];
        let err = config.check_rules().unwrap_err();
        assert!(err.to_string().contains("extensions_to_rename_and_upload"));
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: BndConfig = BndConfig::figment().extract()?;
            assert!(!config.paths.is_configured());
            assert_eq!(
                config.rules.ignored_subject_level_dirs,
                vec!["treadmill-calibration"]
            );
            Ok(())
        });
    }
}
