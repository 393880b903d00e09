//! Uploading several sessions of a subject.

use std::path::PathBuf;

use bnd_core::{ProcessingLevel, SubjectId};
use bnd_validate::{BatchReport, query};

use crate::error::TransferError;
use crate::sync::{SyncExecutor, TransferReport, UploadOptions};

fn local_subject_path(executor: &SyncExecutor, subject: &SubjectId) -> PathBuf {
    executor
        .local_root()
        .join(ProcessingLevel::Raw.as_str())
        .join(subject.as_str())
}

/// Upload the most recent local session of `subject`.
///
/// # Errors
///
/// Fails if the subject has no valid local session, or the upload fails.
pub fn upload_last_session(
    executor: &SyncExecutor,
    subject: &SubjectId,
    options: &UploadOptions,
) -> Result<TransferReport, TransferError> {
    let session_path = query::last_session(&local_subject_path(executor, subject), subject)?;
    tracing::info!(session = %session_path.display(), "uploading last session");
    executor.upload_session(&session_path, subject, options)
}

/// Upload every valid local session of `subject`, one after another.
///
/// A failing session is recorded and the next one is attempted.
///
/// # Errors
///
/// Only an unreadable subject directory aborts the batch.
pub fn upload_subject(
    executor: &SyncExecutor,
    subject: &SubjectId,
    options: &UploadOptions,
) -> Result<BatchReport, TransferError> {
    let listing = query::list_subject_sessions(&local_subject_path(executor, subject), subject)?;

    let mut report = BatchReport::default();
    for session_path in listing.valid {
        let result = executor
            .upload_session(&session_path, subject, options)
            .map(|upload| upload.diagnostics);
        report.record(&session_path, result);
    }
    Ok(report)
}
