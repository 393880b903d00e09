use std::path::{Path, PathBuf};

use anyhow::Context;
use bnd_config::{BndConfig, StorageSide};
use bnd_core::ProcessingLevel;
use bnd_transfer::SyncExecutor;

/// Shared application resources loaded once at startup.
pub struct AppContext {
    pub config: BndConfig,
}

impl AppContext {
    /// Load configuration from `.env`, TOML files and `BND_*` variables.
    pub fn load() -> anyhow::Result<Self> {
        let config = BndConfig::load_with_dotenv().context("failed to load bnd configuration")?;
        Ok(Self { config })
    }

    /// Root of the local or remote tree.
    pub fn root(&self, remote: bool) -> anyhow::Result<&Path> {
        let side = if remote {
            StorageSide::Remote
        } else {
            StorageSide::Local
        };
        Ok(self.config.paths.root(side)?)
    }

    /// `<root>/<level>` on the requested side.
    pub fn level_path(&self, level: ProcessingLevel, remote: bool) -> anyhow::Result<PathBuf> {
        Ok(self.root(remote)?.join(level.as_str()))
    }

    /// Executor over both configured roots, after checking they are usable.
    pub fn executor(&self) -> anyhow::Result<SyncExecutor> {
        let paths = &self.config.paths;
        paths
            .check_roots()
            .context("storage roots are not ready for a transfer")?;
        Ok(SyncExecutor::new(
            &paths.local,
            &paths.remote,
            self.config.rules.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bnd_config::{BndConfig, PathsConfig};
    use bnd_core::ProcessingLevel;

    use super::AppContext;

    fn context(local: PathBuf, remote: PathBuf) -> AppContext {
        AppContext {
            config: BndConfig {
                paths: PathsConfig { local, remote },
                ..Default::default()
            },
        }
    }

    #[test]
    fn level_path_picks_the_requested_side() {
        let ctx = context(PathBuf::from("/data/local"), PathBuf::from("/mnt/remote"));
        assert_eq!(
            ctx.level_path(ProcessingLevel::Raw, true).expect("remote root"),
            PathBuf::from("/mnt/remote/raw")
        );
        assert_eq!(
            ctx.level_path(ProcessingLevel::Processed, false)
                .expect("local root"),
            PathBuf::from("/data/local/processed")
        );
    }

    #[test]
    fn unset_root_is_reported() {
        let ctx = context(PathBuf::from("/data/local"), PathBuf::new());
        let err = ctx.root(true).expect_err("remote root is unset");
        assert!(err.to_string().contains("paths.remote"));
    }

    #[test]
    fn executor_requires_raw_folders() {
        let local = tempfile::tempdir().expect("tempdir");
        let remote = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(local.path().join("raw")).expect("local raw");
        let ctx = context(local.path().to_path_buf(), remote.path().to_path_buf());

        let err = ctx.executor().expect_err("remote has no raw folder");
        assert!(format!("{err:#}").contains("has no raw folder"));

        std::fs::create_dir(remote.path().join("raw")).expect("remote raw");
        let executor = ctx.executor().expect("both roots usable");
        assert_eq!(executor.remote_root(), remote.path());
    }
}
