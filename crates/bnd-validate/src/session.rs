//! Whole-session validation.
//!
//! Composes the modality validators. The same entry point checks a local
//! session before a transfer and the remote copy after it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bnd_core::{Modality, SessionName, SessionRules, SubjectId, Validated};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::walk;
use crate::{behavior, ephys, extra, video};

/// Which modalities to validate or transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalitySelection {
    pub behavior: bool,
    pub ephys: bool,
    pub video: bool,
    pub extra_files: bool,
}

impl ModalitySelection {
    /// Behavior, ephys and video; the usual raw-data selection.
    #[must_use]
    pub const fn raw_data() -> Self {
        Self {
            behavior: true,
            ephys: true,
            video: true,
            extra_files: false,
        }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            behavior: true,
            ephys: true,
            video: true,
            extra_files: true,
        }
    }

    #[must_use]
    pub fn only(modality: Modality) -> Self {
        let mut selection = Self::default();
        selection.set(modality, true);
        selection
    }

    #[must_use]
    pub const fn contains(&self, modality: Modality) -> bool {
        match modality {
            Modality::Behavior => self.behavior,
            Modality::Ephys => self.ephys,
            Modality::Video => self.video,
            Modality::ExtraFiles => self.extra_files,
        }
    }

    pub const fn set(&mut self, modality: Modality, on: bool) {
        match modality {
            Modality::Behavior => self.behavior = on,
            Modality::Ephys => self.ephys = on,
            Modality::Video => self.video = on,
            Modality::ExtraFiles => self.extra_files = on,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.behavior || self.ephys || self.video || self.extra_files)
    }

    /// Selected modalities in canonical order.
    #[must_use]
    pub fn modalities(&self) -> Vec<Modality> {
        Modality::ALL
            .into_iter()
            .filter(|m| self.contains(*m))
            .collect()
    }
}

/// Validated paths per modality, iterated in canonical modality order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModalityPaths(BTreeMap<Modality, Vec<PathBuf>>);

impl ModalityPaths {
    pub fn insert(&mut self, modality: Modality, paths: Vec<PathBuf>) {
        self.0.insert(modality, paths);
    }

    #[must_use]
    pub fn get(&self, modality: Modality) -> Option<&[PathBuf]> {
        self.0.get(&modality).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Modality, &[PathBuf])> {
        self.0.iter().map(|(m, paths)| (*m, paths.as_slice()))
    }

    #[must_use]
    pub fn modalities(&self) -> Vec<Modality> {
        self.0.keys().copied().collect()
    }

    /// Total number of paths across modalities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Check that `session_path` exists and its name is a session of `subject`.
///
/// # Errors
///
/// [`ValidationError::SessionNotFound`] or the naming error of the folder name.
pub fn validate_session_path(
    session_path: &Path,
    subject: &SubjectId,
) -> Result<SessionName, ValidationError> {
    if !session_path.is_dir() {
        return Err(ValidationError::SessionNotFound(session_path.to_path_buf()));
    }
    Ok(SessionName::parse(&walk::file_name(session_path), subject)?)
}

/// Run the validator of a single modality.
///
/// # Errors
///
/// Whatever hard failure that validator raises.
pub fn validate_modality(
    session_path: &Path,
    subject: &SubjectId,
    modality: Modality,
    rules: &SessionRules,
) -> Result<Validated<Vec<PathBuf>>, ValidationError> {
    match modality {
        Modality::Behavior => behavior::validate_behavior(session_path, subject, rules),
        Modality::Ephys => ephys::validate_ephys(session_path, subject, rules),
        Modality::Video => video::validate_video(session_path, subject),
        Modality::ExtraFiles => extra::find_extra_files(session_path, subject, rules),
    }
}

/// Validate the selected modalities of one session.
///
/// The first hard failure aborts; diagnostics of every validator that ran
/// are accumulated.
///
/// # Errors
///
/// [`ValidationError::NothingRequested`] for an empty selection, otherwise the
/// first modality's hard failure.
pub fn validate_session(
    session_path: &Path,
    subject: &SubjectId,
    selection: &ModalitySelection,
    rules: &SessionRules,
) -> Result<Validated<ModalityPaths>, ValidationError> {
    if selection.is_empty() {
        return Err(ValidationError::NothingRequested);
    }

    let mut paths = ModalityPaths::default();
    let mut diagnostics = Vec::new();
    for modality in selection.modalities() {
        tracing::debug!(session = %session_path.display(), %modality, "validating modality");
        let found = validate_modality(session_path, subject, modality, rules)?;
        paths.insert(modality, found.collect_into(&mut diagnostics));
    }

    Ok(Validated::with_diagnostics(paths, diagnostics))
}
