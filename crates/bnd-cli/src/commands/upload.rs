use bnd_transfer::UploadOptions;
use bnd_transfer::batch::{upload_last_session, upload_subject};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ModalityFlags, RenameFlags, UploadCommands};
use crate::commands::shared::batch::{finish, log_diagnostics};
use crate::commands::shared::parse::{absolute_path, parse_subject};
use crate::context::AppContext;
use crate::output::output;

/// Handle `bnd upload`.
pub fn handle(action: &UploadCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let executor = ctx.executor()?;
    match action {
        UploadCommands::Session {
            path,
            subject,
            modalities,
            renames,
        } => {
            let path = absolute_path(path)?;
            let subject = parse_subject(subject)?;
            let report =
                executor.upload_session(&path, &subject, &upload_options(modalities, renames))?;
            log_diagnostics(&report.diagnostics);
            output(&report, flags.format)
        }
        UploadCommands::Last {
            subject,
            modalities,
            renames,
        } => {
            let subject = parse_subject(subject)?;
            let report =
                upload_last_session(&executor, &subject, &upload_options(modalities, renames))?;
            log_diagnostics(&report.diagnostics);
            output(&report, flags.format)
        }
        UploadCommands::Subject {
            subject,
            modalities,
            renames,
        } => {
            let subject = parse_subject(subject)?;
            let report = upload_subject(&executor, &subject, &upload_options(modalities, renames))?;
            finish(&report, flags)
        }
    }
}

fn upload_options(modalities: &ModalityFlags, renames: &RenameFlags) -> UploadOptions {
    let mut options = UploadOptions::new(modalities.selection());
    options.rename_videos &= !renames.no_rename_videos;
    options.rename_extra_files &= !renames.no_rename_extra;
    options
}
