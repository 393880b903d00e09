//! Raw SpikeGLX electrophysiology recordings.
//!
//! Layout: `<session>_g<d>/<session>_g<d>_imec<d>/<recording>_t0.imec<d>.<stream>`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bnd_core::naming::is_spikeglx_stream_file;
use bnd_core::{
    Diagnostic, DiagnosticKind, Modality, ProbeName, RecordingName, SessionName, SessionRules,
    SubjectId, Validated,
};

use crate::error::ValidationError;
use crate::session::validate_session_path;
use crate::walk::{self, WalkMode};

/// Validate the ephys recordings of a session.
///
/// Returns the recording folders. No recording is reported as a
/// [`DiagnosticKind::NoRecordings`] diagnostic with an empty set, several as
/// [`DiagnosticKind::MultipleRecordings`] with all of them returned.
///
/// # Errors
///
/// Fails on a malformed recording or probe folder, a stray file in a
/// recording folder, a probe folder without exactly the expected stream
/// files, or a stream file outside every recording folder.
pub fn validate_ephys(
    session_path: &Path,
    subject: &SubjectId,
    rules: &SessionRules,
) -> Result<Validated<Vec<PathBuf>>, ValidationError> {
    let session = validate_session_path(session_path, subject)?;

    let recordings: Vec<PathBuf> = walk::list_dir(session_path, WalkMode::Visible)?
        .into_iter()
        .filter(|p| p.is_dir() && RecordingName::looks_like_recording(&walk::file_name(p)))
        .collect();

    let mut diagnostics = Vec::new();
    match recordings.len() {
        0 => diagnostics.push(Diagnostic::new(
            Modality::Ephys,
            DiagnosticKind::NoRecordings,
            session_path,
            format!("No raw ephys recordings found in {}", session_path.display()),
        )),
        1 => {}
        n => {
            tracing::debug!(session = %session, recordings = n, "multiple ephys recordings");
            diagnostics.push(Diagnostic::new(
                Modality::Ephys,
                DiagnosticKind::MultipleRecordings,
                session_path,
                format!(
                    "More than one raw ephys recordings found in {}",
                    session_path.display()
                ),
            ));
        }
    }

    for recording in &recordings {
        validate_recording(recording, &session, rules)?;
    }

    for file in walk::files_below(session_path, WalkMode::Visible)? {
        if is_spikeglx_stream_file(&walk::file_name(&file))
            && !recordings.iter().any(|r| file.starts_with(r))
        {
            return Err(ValidationError::OrphanStreamFile(file));
        }
    }

    Ok(Validated::with_diagnostics(recordings, diagnostics))
}

/// Validate one recording folder and its probe folders. Returns the probes.
///
/// # Errors
///
/// See [`validate_ephys`].
pub fn validate_recording(
    recording_path: &Path,
    session: &SessionName,
    rules: &SessionRules,
) -> Result<Vec<PathBuf>, ValidationError> {
    let recording = RecordingName::parse(&walk::file_name(recording_path), session)?;

    let mut probes = Vec::new();
    for child in walk::list_dir(recording_path, WalkMode::Visible)? {
        if child.is_dir() {
            probes.push(child);
        } else if !rules.has_allowed_extension(&walk::file_name(&child)) {
            return Err(ValidationError::StrayFileInRecording(child));
        }
    }

    for probe_path in &probes {
        let probe = ProbeName::parse(&walk::file_name(probe_path), &recording)?;
        validate_probe(probe_path, &probe, rules)?;
    }

    Ok(probes)
}

fn validate_probe(
    probe_path: &Path,
    probe: &ProbeName,
    rules: &SessionRules,
) -> Result<(), ValidationError> {
    let found: BTreeSet<String> = walk::list_dir(probe_path, WalkMode::Visible)?
        .iter()
        .map(|p| walk::file_name(p))
        .filter(|name| !rules.has_allowed_extension(name))
        .collect();
    let expected = probe.expected_stream_files();

    if found == expected {
        return Ok(());
    }
    Err(ValidationError::ProbeFilesMismatch {
        probe: probe_path.to_path_buf(),
        missing: expected.difference(&found).cloned().collect(),
        unexpected: found.difference(&expected).cloned().collect(),
    })
}
