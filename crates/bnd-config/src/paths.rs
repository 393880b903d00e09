//! Storage roots.

use std::path::{Path, PathBuf};

use bnd_core::ProcessingLevel;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which of the two mirrored storage trees to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSide {
    Local,
    Remote,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Root of the local data tree (contains `raw/` and `processed/`).
    #[serde(default)]
    pub local: PathBuf,

    /// Root of the remote data tree, usually a mounted network share.
    #[serde(default)]
    pub remote: PathBuf,
}

impl PathsConfig {
    /// Returns `true` if both roots are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.local.as_os_str().is_empty() && !self.remote.as_os_str().is_empty()
    }

    /// Root of the requested side.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if that root is not set.
    pub fn root(&self, side: StorageSide) -> Result<&Path, ConfigError> {
        let (path, key, env) = match side {
            StorageSide::Local => (&self.local, "paths.local", "BND_PATHS__LOCAL"),
            StorageSide::Remote => (&self.remote, "paths.remote", "BND_PATHS__REMOTE"),
        };
        if path.as_os_str().is_empty() {
            return Err(ConfigError::NotConfigured {
                key: key.to_string(),
                env: env.to_string(),
            });
        }
        Ok(path)
    }

    /// Check that both roots exist, are directories and contain `raw/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BadRoot`] naming the first failing root.
    pub fn check_roots(&self) -> Result<(), ConfigError> {
        for side in [StorageSide::Local, StorageSide::Remote] {
            check_root(self.root(side)?)?;
        }
        Ok(())
    }
}

fn check_root(root: &Path) -> Result<(), ConfigError> {
    let bad = |reason: &str| ConfigError::BadRoot {
        path: root.to_path_buf(),
        reason: reason.to_string(),
    };

    if !root.exists() {
        return Err(bad("does not exist"));
    }
    if !root.is_dir() {
        return Err(bad("is not a directory"));
    }
    if !root.join(ProcessingLevel::Raw.as_str()).is_dir() {
        return Err(bad("has no raw folder"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconfigured() {
        let config = PathsConfig::default();
        assert!(!config.is_configured());
        assert!(matches!(
            config.root(StorageSide::Remote),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn check_roots_requires_raw_folder() {
        let local = tempfile::tempdir().unwrap();
        let remote = tempfile::tempdir().unwrap();
        std::fs::create_dir(local.path().join("raw")).unwrap();

        let config = PathsConfig {
            local: local.path().to_path_buf(),
            remote: remote.path().to_path_buf(),
        };
        let err = config.check_roots().unwrap_err();
        assert!(err.to_string().contains("has no raw folder"));

        std::fs::create_dir(remote.path().join("raw")).unwrap();
        config.check_roots().expect("both roots usable");
    }

    #[test]
    fn check_roots_rejects_missing_root() {
        let config = PathsConfig {
            local: PathBuf::from("/definitely/not/here"),
            remote: PathBuf::from("/definitely/not/here/either"),
        };
        let err = config.check_roots().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
