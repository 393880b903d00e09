use bnd_config::BndConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &BndConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &BndConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.paths.is_configured() && has_env_prefix(&env_keys, "BND_PATHS") {
        warnings.push(
            "Storage paths appear unset while BND_PATHS* env vars exist. Use double underscores (example: BND_PATHS__REMOTE)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "BND_RULES_") {
        warnings.push(
            "BND_RULES_* env vars are ignored. Use double underscores (example: BND_RULES__DEVICE_COUNT)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key[prefix.len()..].starts_with('_'))
}
