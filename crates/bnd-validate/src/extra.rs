//! Extra files: whitelisted root files and allowed-extension files below the
//! root. Discovery only; nothing here is ever a structural violation.

use std::path::{Path, PathBuf};

use bnd_core::{ExtraFileName, SessionName, SessionRules, SubjectId, Validated};

use crate::error::ValidationError;
use crate::session::validate_session_path;
use crate::walk::{self, WalkMode};

/// Whitelisted files present at the session root, bare or session-prefixed.
#[must_use]
pub fn whitelisted_root_files(
    session_path: &Path,
    session: &SessionName,
    rules: &SessionRules,
) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for allowed in &rules.whitelisted_files_in_root {
        for name in [
            allowed.clone(),
            ExtraFileName::canonical(session, allowed),
        ] {
            let path = session_path.join(name);
            if path.is_file() {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Files below (not at) the session root with an allowed extension.
///
/// # Errors
///
/// Returns the first walk error.
pub fn files_with_allowed_extensions(
    session_path: &Path,
    rules: &SessionRules,
) -> Result<Vec<PathBuf>, ValidationError> {
    Ok(walk::files_below(session_path, WalkMode::Visible)?
        .into_iter()
        .filter(|p| p.parent() != Some(session_path))
        .filter(|p| rules.has_allowed_extension(&walk::file_name(p)))
        .collect())
}

/// Every extra file of a session, sorted and deduplicated.
///
/// # Errors
///
/// Fails only on an invalid session name or a walk error.
pub fn find_extra_files(
    session_path: &Path,
    subject: &SubjectId,
    rules: &SessionRules,
) -> Result<Validated<Vec<PathBuf>>, ValidationError> {
    let session = validate_session_path(session_path, subject)?;

    let mut files = whitelisted_root_files(session_path, &session, rules);
    files.extend(files_with_allowed_extensions(session_path, rules)?);
    files.sort();
    files.dedup();

    tracing::debug!(session = %session, count = files.len(), "extra files found");
    Ok(Validated::clean(files))
}
