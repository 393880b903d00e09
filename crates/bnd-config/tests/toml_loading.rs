//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use std::path::PathBuf;

use bnd_config::BndConfig;
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_paths_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[paths]
local = "/data/bnd"
remote = "/mnt/rds/bnd"
"#,
        )?;

        let config: BndConfig = Figment::from(Serialized::defaults(BndConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.paths.local, PathBuf::from("/data/bnd"));
        assert_eq!(config.paths.remote, PathBuf::from("/mnt/rds/bnd"));
        assert!(config.paths.is_configured());
        Ok(())
    });
}

#[test]
fn loads_rules_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[rules]
whitelisted_files_in_root = ["comment.txt"]
extensions_to_rename_and_upload = [".txt"]
device_count = 3
"#,
        )?;

        let config: BndConfig = Figment::from(Serialized::defaults(BndConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.rules.whitelisted_files_in_root, vec!["comment.txt"]);
        assert_eq!(config.rules.extensions_to_rename_and_upload, vec![".txt"]);
        assert_eq!(config.rules.device_count, 3);
        // not in the file, keeps the default
        assert_eq!(
            config.rules.ignored_subject_level_dirs,
            vec!["treadmill-calibration"]
        );
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".bnd")?;
        jail.create_file(
            ".bnd/config.toml",
            r#"
[paths]
local = "/project/local"
"#,
        )?;

        let config = BndConfig::load().expect("config loads");
        assert_eq!(config.paths.local, PathBuf::from("/project/local"));
        assert!(!config.paths.is_configured());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[paths]
local = "/from/toml"
remote = "/from/toml/remote"
"#,
        )?;
        jail.set_env("BND_PATHS__LOCAL", "/from/env");

        let config: BndConfig = Figment::from(Serialized::defaults(BndConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("BND_").split("__"))
            .extract()?;

        assert_eq!(config.paths.local, PathBuf::from("/from/env"));
        assert_eq!(config.paths.remote, PathBuf::from("/from/toml/remote"));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".bnd")?;
        jail.create_file(".bnd/config.toml", "[rules]\ndevice_count = \"many\"\n")?;

        let err = BndConfig::load().expect_err("invalid device count");
        assert!(err.to_string().contains("Configuration error"));
        Ok(())
    });
}
