//! Validating many sessions at once.
//!
//! Batch entry points are the only place where hard errors are turned into
//! data: every session gets a pass/fail outcome and one failure never stops
//! the rest.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use bnd_core::{Diagnostic, ProcessingLevel, SessionRules, SubjectId};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ValidationError;
use crate::query;
use crate::session::{ModalitySelection, validate_session};
use crate::walk;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionOutcome {
    Passed { diagnostics: Vec<Diagnostic> },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub session: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: SessionOutcome,
}

impl SessionReport {
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.outcome, SessionOutcome::Passed { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub sessions: Vec<SessionReport>,
}

impl BatchReport {
    /// Record the outcome of one session.
    pub fn record<E: Display>(&mut self, path: &Path, result: Result<Vec<Diagnostic>, E>) {
        let session = walk::file_name(path);
        let outcome = match result {
            Ok(diagnostics) => SessionOutcome::Passed { diagnostics },
            Err(err) => {
                tracing::warn!(%session, error = %err, "session failed");
                SessionOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };
        self.sessions.push(SessionReport {
            session,
            path: path.to_path_buf(),
            outcome,
        });
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.sessions.iter().filter(|r| r.passed()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.sessions.len() - self.passed()
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Only raw sessions have structural rules.
///
/// # Errors
///
/// [`ValidationError::UnsupportedLevel`] for anything but raw.
pub fn ensure_raw(level: ProcessingLevel) -> Result<(), ValidationError> {
    match level {
        ProcessingLevel::Raw => Ok(()),
        ProcessingLevel::Processed => Err(ValidationError::UnsupportedLevel(level)),
    }
}

/// Validate every folder of a subject directory as a session.
///
/// Folders whose name is not a session of `subject` are reported as failed.
///
/// # Errors
///
/// Only an empty selection or an unreadable subject directory abort the batch.
pub fn validate_subject(
    subject_path: &Path,
    subject: &SubjectId,
    selection: &ModalitySelection,
    rules: &SessionRules,
) -> Result<BatchReport, ValidationError> {
    if selection.is_empty() {
        return Err(ValidationError::NothingRequested);
    }

    let listing = query::list_subject_sessions(subject_path, subject)?;
    let mut sessions: Vec<PathBuf> = listing.valid.into_iter().chain(listing.invalid).collect();
    sessions.sort();

    let mut report = BatchReport::default();
    for session_path in sessions {
        let result = validate_session(&session_path, subject, selection, rules)
            .map(|validated| validated.diagnostics);
        report.record(&session_path, result);
    }
    Ok(report)
}

/// Validate every session recorded on `day` under a processing-level
/// directory.
///
/// # Errors
///
/// Only an empty selection or an unreadable level directory abort the batch.
pub fn validate_day(
    level_path: &Path,
    day: NaiveDate,
    selection: &ModalitySelection,
    rules: &SessionRules,
) -> Result<BatchReport, ValidationError> {
    if selection.is_empty() {
        return Err(ValidationError::NothingRequested);
    }

    let mut report = BatchReport::default();
    for found in query::all_sessions_on_day(level_path, day, rules)? {
        let session_path = level_path.join(&found.subject).join(&found.session);
        let result = SubjectId::parse(&found.subject)
            .map_err(ValidationError::from)
            .and_then(|subject| validate_session(&session_path, &subject, selection, rules))
            .map(|validated| validated.diagnostics);
        report.record(&session_path, result);
    }
    Ok(report)
}
