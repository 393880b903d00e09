//! Conflict-safe transfer of validated session data.
//!
//! Per modality: check every existing target against its source, copy what
//! is missing, then re-validate the destination with the same validator and
//! require the same relative path set. Modalities run one after another in
//! canonical order; a failure stops the session without rolling back the
//! modalities already copied.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bnd_core::{
    Diagnostic, DiagnosticKind, Modality, ProcessingLevel, SessionName, SessionRules, SubjectId,
};
use bnd_validate::{
    ModalitySelection, ValidationError, validate_modality, validate_session,
    validate_session_path,
};
use serde::Serialize;

use crate::copy::{self, CopyStats};
use crate::diff::compare_paths;
use crate::error::TransferError;
use crate::normalize::{self, Rename};
use crate::plan::{self, relative_set};

/// Which way data flows between the two roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Upload,
    Download,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an upload should do besides copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub selection: ModalitySelection,
    pub rename_videos: bool,
    pub rename_extra_files: bool,
}

impl UploadOptions {
    /// Upload `selection`, renaming whatever of it can be renamed.
    #[must_use]
    pub const fn new(selection: ModalitySelection) -> Self {
        Self {
            selection,
            rename_videos: selection.video,
            rename_extra_files: selection.extra_files,
        }
    }
}

/// Outcome of one modality's transfer. Paths are relative to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalityTransfer {
    pub modality: Modality,
    pub copied: Vec<PathBuf>,
    /// Targets that already existed with identical contents.
    pub unchanged: Vec<PathBuf>,
    pub stats: CopyStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub session: String,
    pub direction: Direction,
    pub renames: Vec<Rename>,
    pub modalities: Vec<ModalityTransfer>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TransferReport {
    fn new(session: &SessionName, direction: Direction) -> Self {
        Self {
            session: session.to_string(),
            direction,
            renames: Vec::new(),
            modalities: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

fn require_dir(path: &Path, what: String) -> Result<(), TransferError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(TransferError::MissingDirectory {
            what,
            path: path.to_path_buf(),
        })
    }
}

/// Make sure the subject directory exists on the remote side.
///
/// The local `<level>` and subject directories and the remote `<level>`
/// directory must exist; the remote subject directory is created if missing.
///
/// # Errors
///
/// [`TransferError::MissingDirectory`] naming the first missing directory.
pub fn sync_subject_dir(
    subject: &SubjectId,
    level: ProcessingLevel,
    local_root: &Path,
    remote_root: &Path,
) -> Result<PathBuf, TransferError> {
    let local_level = local_root.join(level.as_str());
    require_dir(&local_level, format!("Local '{level}' directory"))?;
    require_dir(
        &local_level.join(subject.as_str()),
        "Local subject directory".to_string(),
    )?;

    let remote_level = remote_root.join(level.as_str());
    require_dir(&remote_level, format!("Remote '{level}' directory"))?;

    let remote_subject = remote_level.join(subject.as_str());
    if !remote_subject.is_dir() {
        fs::create_dir(&remote_subject)?;
        tracing::info!(path = %remote_subject.display(), "created remote subject directory");
    }
    Ok(remote_subject)
}

/// Copies validated session data between a local and a remote root.
#[derive(Debug, Clone)]
pub struct SyncExecutor {
    local_root: PathBuf,
    remote_root: PathBuf,
    rules: SessionRules,
}

impl SyncExecutor {
    #[must_use]
    pub fn new(
        local_root: impl Into<PathBuf>,
        remote_root: impl Into<PathBuf>,
        rules: SessionRules,
    ) -> Self {
        Self {
            local_root: local_root.into(),
            remote_root: remote_root.into(),
            rules,
        }
    }

    #[must_use]
    pub fn local_root(&self) -> &Path {
        &self.local_root
    }

    #[must_use]
    pub fn remote_root(&self) -> &Path {
        &self.remote_root
    }

    #[must_use]
    pub const fn rules(&self) -> &SessionRules {
        &self.rules
    }

    /// `(from, to)` roots for `direction`.
    fn roots(&self, direction: Direction) -> (&Path, &Path) {
        match direction {
            Direction::Upload => (self.local_root.as_path(), self.remote_root.as_path()),
            Direction::Download => (self.remote_root.as_path(), self.local_root.as_path()),
        }
    }

    /// Path of a raw session on one side.
    #[must_use]
    pub fn raw_session_path(&self, session: &SessionName, remote: bool) -> PathBuf {
        let root = if remote { &self.remote_root } else { &self.local_root };
        root.join(ProcessingLevel::Raw.as_str())
            .join(session.subject().as_str())
            .join(session.as_str())
    }

    /// The session must sit below the local root's `raw` directory.
    ///
    /// # Errors
    ///
    /// [`TransferError::OutsideRoot`] or [`TransferError::WrongLevel`].
    pub fn check_session_location(&self, session_path: &Path) -> Result<(), TransferError> {
        let relative = plan::relative_to(session_path, &self.local_root)?;
        let level = relative
            .components()
            .next()
            .and_then(|c| ProcessingLevel::from_dir_name(&c.as_os_str().to_string_lossy()));
        if level == Some(ProcessingLevel::Raw) {
            Ok(())
        } else {
            Err(TransferError::WrongLevel(session_path.to_path_buf()))
        }
    }

    /// Transfer one modality of a session whose `paths` were validated on
    /// the source side.
    ///
    /// # Errors
    ///
    /// [`TransferError::NothingToTransfer`] for an empty path set,
    /// [`TransferError::Conflict`] if an existing target differs (nothing is
    /// copied then), [`TransferError::Verification`] if the destination does
    /// not re-validate to the same relative paths, or any validation or I/O
    /// error.
    pub fn transfer_modality(
        &self,
        direction: Direction,
        session_path: &Path,
        subject: &SubjectId,
        modality: Modality,
        paths: &[PathBuf],
    ) -> Result<ModalityTransfer, TransferError> {
        if paths.is_empty() {
            return Err(TransferError::NothingToTransfer {
                modality,
                session: session_path.to_path_buf(),
                reason: nothing_found(modality).to_string(),
            });
        }

        let (from_root, to_root) = self.roots(direction);
        let target_session = plan::mirror_path(session_path, from_root, to_root)?;
        let planned = plan::plan_transfer(paths, from_root, to_root)?;

        let mut pending = Vec::new();
        let mut unchanged = Vec::new();
        for copy in planned {
            if copy.target.exists() {
                let diff = compare_paths(&copy.source, &copy.target)?;
                if !diff.is_empty() {
                    return Err(TransferError::Conflict {
                        source_path: copy.source,
                        target: copy.target,
                        diff,
                    });
                }
                tracing::debug!(target = %copy.target.display(), "target identical, skipping");
                unchanged.push(plan::relative_to(&copy.source, session_path)?.to_path_buf());
            } else {
                pending.push(copy);
            }
        }

        let mut stats = CopyStats::default();
        let mut copied = Vec::new();
        for copy in &pending {
            stats.add(copy::copy_path(&copy.source, &copy.target)?);
            copied.push(plan::relative_to(&copy.source, session_path)?.to_path_buf());
        }

        let expected = relative_set(paths, session_path)?;
        let revalidated = validate_modality(&target_session, subject, modality, &self.rules)?;
        let found = relative_set(&revalidated.value, &target_session)?;
        if expected != found {
            return Err(TransferError::Verification {
                modality,
                session: target_session,
                missing: expected.difference(&found).cloned().collect(),
                unexpected: found.difference(&expected).cloned().collect(),
            });
        }

        tracing::info!(
            %direction,
            %modality,
            session = %session_path.display(),
            copied = copied.len(),
            unchanged = unchanged.len(),
            "modality transferred"
        );
        Ok(ModalityTransfer {
            modality,
            copied,
            unchanged,
            stats,
        })
    }

    /// Upload a local raw session.
    ///
    /// Runs the requested renamers, validates the selected modalities,
    /// ensures the remote subject directory and transfers the modalities in
    /// canonical order. Requested ephys or video data that is absent fails
    /// before anything is copied.
    ///
    /// # Errors
    ///
    /// [`TransferError::RenameNotAllowed`] when renaming a modality that is
    /// not uploaded, plus every error of the steps above.
    pub fn upload_session(
        &self,
        session_path: &Path,
        subject: &SubjectId,
        options: &UploadOptions,
    ) -> Result<TransferReport, TransferError> {
        let selection = options.selection;
        if selection.is_empty() {
            return Err(ValidationError::NothingRequested.into());
        }
        if options.rename_videos && !selection.video {
            return Err(TransferError::RenameNotAllowed {
                what: "videos".to_string(),
            });
        }
        if options.rename_extra_files && !selection.extra_files {
            return Err(TransferError::RenameNotAllowed {
                what: "extra files".to_string(),
            });
        }

        self.check_session_location(session_path)?;
        let session = validate_session_path(session_path, subject)?;
        let mut report = TransferReport::new(&session, Direction::Upload);

        if options.rename_videos {
            report
                .renames
                .extend(normalize::rename_raw_videos(session_path, subject)?);
        }
        if options.rename_extra_files {
            report
                .renames
                .extend(normalize::rename_extra_files(session_path, &self.rules)?);
        }

        let validated = validate_session(session_path, subject, &selection, &self.rules)?;
        let paths = validated.collect_into(&mut report.diagnostics);
        for modality in [Modality::Ephys, Modality::Video] {
            if paths.get(modality).is_some_and(<[PathBuf]>::is_empty) {
                return Err(TransferError::NothingToTransfer {
                    modality,
                    session: session_path.to_path_buf(),
                    reason: nothing_found(modality).to_string(),
                });
            }
        }

        sync_subject_dir(
            subject,
            ProcessingLevel::Raw,
            &self.local_root,
            &self.remote_root,
        )?;

        for (modality, modality_paths) in paths.iter() {
            if modality_paths.is_empty() {
                tracing::debug!(%modality, "nothing to upload");
                continue;
            }
            report.modalities.push(self.transfer_modality(
                Direction::Upload,
                session_path,
                subject,
                modality,
                modality_paths,
            )?);
        }
        Ok(report)
    }

    /// Download a raw session from the remote root.
    ///
    /// Modalities that are missing or invalid on the remote are skipped with
    /// a [`DiagnosticKind::SkippedModality`] diagnostic.
    ///
    /// # Errors
    ///
    /// Fails if nothing is selected, the remote session does not exist, the
    /// local `raw` directory is missing, or a transfer fails.
    pub fn download_session(
        &self,
        session: &SessionName,
        selection: &ModalitySelection,
    ) -> Result<TransferReport, TransferError> {
        if selection.is_empty() {
            return Err(ValidationError::NothingRequested.into());
        }
        let subject = session.subject();
        let remote_session = self.raw_session_path(session, true);
        if !remote_session.is_dir() {
            return Err(ValidationError::SessionNotFound(remote_session).into());
        }

        let local_level = self.local_root.join(ProcessingLevel::Raw.as_str());
        require_dir(&local_level, format!("Local '{}' directory", ProcessingLevel::Raw))?;
        fs::create_dir_all(local_level.join(subject.as_str()))?;

        let mut report = TransferReport::new(session, Direction::Download);
        for modality in selection.modalities() {
            let reason = match validate_modality(&remote_session, subject, modality, &self.rules) {
                Ok(validated) if !validated.value.is_empty() => {
                    let paths = validated.collect_into(&mut report.diagnostics);
                    report.modalities.push(self.transfer_modality(
                        Direction::Download,
                        &remote_session,
                        subject,
                        modality,
                        &paths,
                    )?);
                    continue;
                }
                Ok(_) => nothing_found(modality).to_string(),
                Err(err) => err.to_string(),
            };
            tracing::warn!(%modality, session = %session, %reason, "skipping modality");
            report.diagnostics.push(Diagnostic::new(
                modality,
                DiagnosticKind::SkippedModality,
                &remote_session,
                format!("Skipping {modality}: {reason}"),
            ));
        }
        Ok(report)
    }
}

const fn nothing_found(modality: Modality) -> &'static str {
    match modality {
        Modality::Behavior => "no behavioral files found",
        Modality::Ephys => "no recordings found",
        Modality::Video => "no video folder found",
        Modality::ExtraFiles => "no extra files found",
    }
}
