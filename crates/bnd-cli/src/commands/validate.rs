use std::path::PathBuf;

use bnd_core::{Diagnostic, ProcessingLevel, SubjectId};
use bnd_validate::{ModalityPaths, batch, query, validate_session};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ModalityFlags, ValidateCommands};
use crate::commands::shared::batch::{finish, log_diagnostics};
use crate::commands::shared::parse::{absolute_path, parse_day, parse_enum, parse_subject};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SessionValidation {
    path: PathBuf,
    modalities: ModalityPaths,
    diagnostics: Vec<Diagnostic>,
}

/// Handle `bnd validate`.
pub fn handle(
    action: &ValidateCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ValidateCommands::Session {
            path,
            subject,
            modalities,
        } => session(
            absolute_path(path)?,
            &parse_subject(subject)?,
            modalities,
            ctx,
            flags,
        ),
        ValidateCommands::Last {
            subject,
            remote,
            modalities,
        } => {
            let subject = parse_subject(subject)?;
            let subject_path = ctx
                .level_path(ProcessingLevel::Raw, *remote)?
                .join(subject.as_str());
            let path = query::last_session(&subject_path, &subject)?;
            tracing::info!(path = %path.display(), "validating last session");
            session(path, &subject, modalities, ctx, flags)
        }
        ValidateCommands::Subject {
            subject,
            level,
            remote,
            modalities,
        } => {
            let subject = parse_subject(subject)?;
            let level: ProcessingLevel = parse_enum(level, "level")?;
            batch::ensure_raw(level)?;
            let subject_path = ctx.level_path(level, *remote)?.join(subject.as_str());
            let report = batch::validate_subject(
                &subject_path,
                &subject,
                &modalities.selection(),
                &ctx.config.rules,
            )?;
            finish(&report, flags)
        }
        ValidateCommands::Today {
            remote,
            date,
            modalities,
        } => {
            let day = parse_day(date.as_deref())?;
            let level_path = ctx.level_path(ProcessingLevel::Raw, *remote)?;
            let report = batch::validate_day(
                &level_path,
                day,
                &modalities.selection(),
                &ctx.config.rules,
            )?;
            if report.sessions.is_empty() {
                tracing::warn!(%day, path = %level_path.display(), "no sessions recorded on this day");
            }
            finish(&report, flags)
        }
    }
}

fn session(
    path: PathBuf,
    subject: &SubjectId,
    modalities: &ModalityFlags,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let validated = validate_session(&path, subject, &modalities.selection(), &ctx.config.rules)?;
    log_diagnostics(&validated.diagnostics);
    output(
        &SessionValidation {
            path,
            modalities: validated.value,
            diagnostics: validated.diagnostics,
        },
        flags.format,
    )
}
