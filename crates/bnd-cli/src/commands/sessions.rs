use std::path::PathBuf;

use bnd_core::ProcessingLevel;
use bnd_validate::query;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionsCommands;
use crate::commands::shared::parse::{parse_day, parse_subject};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LastSession {
    session: String,
    path: PathBuf,
}

/// Handle `bnd sessions`.
pub fn handle(
    action: &SessionsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionsCommands::List { subject, remote } => {
            let subject = parse_subject(subject)?;
            let subject_path = ctx
                .level_path(ProcessingLevel::Raw, *remote)?
                .join(subject.as_str());
            let listing = query::list_subject_sessions(&subject_path, &subject)?;
            for invalid in &listing.invalid {
                tracing::warn!(path = %invalid.display(), "folder is not a session of {subject}");
            }
            output(&listing, flags.format)
        }
        SessionsCommands::Last { subject, remote } => {
            let subject = parse_subject(subject)?;
            let subject_path = ctx
                .level_path(ProcessingLevel::Raw, *remote)?
                .join(subject.as_str());
            let path = query::last_session(&subject_path, &subject)?;
            let session = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            output(&LastSession { session, path }, flags.format)
        }
        SessionsCommands::Today { remote, date } => {
            let day = parse_day(date.as_deref())?;
            let level_path = ctx.level_path(ProcessingLevel::Raw, *remote)?;
            let sessions = query::all_sessions_on_day(&level_path, day, &ctx.config.rules)?;
            output(&sessions, flags.format)
        }
    }
}
