use std::path::PathBuf;

use bnd_config::BndConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RootsCheck {
    local: PathBuf,
    remote: PathBuf,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ConfigShow<'a> {
    #[serde(flatten)]
    config: &'a BndConfig,
    user_config_file: Option<PathBuf>,
}

/// Handle `bnd config`.
pub fn handle(action: &ConfigCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => output(
            &ConfigShow {
                config: &ctx.config,
                user_config_file: BndConfig::global_config_path(),
            },
            flags.format,
        ),
        ConfigCommands::Check => {
            ctx.config.paths.check_roots()?;
            output(
                &RootsCheck {
                    local: ctx.config.paths.local.clone(),
                    remote: ctx.config.paths.remote.clone(),
                    status: "ok",
                },
                flags.format,
            )
        }
    }
}
