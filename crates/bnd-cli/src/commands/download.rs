use crate::cli::GlobalFlags;
use crate::cli::subcommands::DownloadCommands;
use crate::commands::shared::batch::log_diagnostics;
use crate::commands::shared::parse::parse_session;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bnd download`.
pub fn handle(
    action: &DownloadCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DownloadCommands::Session {
            session,
            modalities,
        } => {
            let session = parse_session(session)?;
            let report = ctx
                .executor()?
                .download_session(&session, &modalities.selection())?;
            log_diagnostics(&report.diagnostics);
            output(&report, flags.format)
        }
    }
}
