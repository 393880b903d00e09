use bnd_transfer::normalize::{rename_extra_files, rename_raw_videos};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RenameCommands;
use crate::commands::shared::parse::{absolute_path, parse_subject};
use crate::context::AppContext;
use crate::output::output;

/// Handle `bnd rename`.
pub fn handle(action: &RenameCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let renames = match action {
        RenameCommands::Videos { path, subject } => {
            rename_raw_videos(&absolute_path(path)?, &parse_subject(subject)?)?
        }
        RenameCommands::Extra { path } => {
            rename_extra_files(&absolute_path(path)?, &ctx.config.rules)?
        }
    };
    if renames.is_empty() {
        tracing::info!("nothing to rename");
    }
    output(&renames, flags.format)
}
