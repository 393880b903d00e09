use bnd_core::Diagnostic;
use bnd_validate::BatchReport;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Print the per-session outcomes, then fail if any session failed.
pub fn finish(report: &BatchReport, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&report.sessions, flags.format)?;
    if report.all_passed() {
        return Ok(());
    }
    anyhow::bail!(
        "{} of {} sessions failed",
        report.failed(),
        report.sessions.len()
    )
}

/// Surface soft findings on stderr through the log.
pub fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        tracing::warn!(
            modality = %diagnostic.modality,
            path = %diagnostic.path.display(),
            "{}",
            diagnostic.message
        );
    }
}
