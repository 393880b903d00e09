use std::path::PathBuf;

use bnd_config::BndConfig;
use figment::Jail;

#[test]
fn env_sets_roots() {
    Jail::expect_with(|jail| {
        jail.set_env("BND_PATHS__LOCAL", "/data/local");
        jail.set_env("BND_PATHS__REMOTE", "/data/remote");

        let config = BndConfig::load().expect("config loads");
        assert_eq!(config.paths.local, PathBuf::from("/data/local"));
        assert_eq!(config.paths.remote, PathBuf::from("/data/remote"));
        assert!(config.paths.is_configured());
        Ok(())
    });
}

#[test]
fn env_sets_device_count() {
    Jail::expect_with(|jail| {
        jail.set_env("BND_RULES__DEVICE_COUNT", "4");

        let config = BndConfig::load().expect("config loads");
        assert_eq!(config.rules.device_count, 4);
        Ok(())
    });
}

#[test]
fn env_sets_list_values() {
    Jail::expect_with(|jail| {
        jail.set_env("BND_RULES__EXTENSIONS_TO_RENAME_AND_UPLOAD", "[\".txt\", \".csv\"]");

        let config = BndConfig::load().expect("config loads");
        assert_eq!(
            config.rules.extensions_to_rename_and_upload,
            vec![".txt", ".csv"]
        );
        Ok(())
    });
}

#[test]
fn zero_device_count_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("BND_RULES__DEVICE_COUNT", "0");

        let err = BndConfig::load().unwrap_err();
        assert!(err.to_string().contains("rules.device_count"));
        Ok(())
    });
}
