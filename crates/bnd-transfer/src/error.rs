use std::path::PathBuf;

use bnd_core::{Modality, NamingError};
use bnd_validate::ValidationError;
use thiserror::Error;

use crate::diff::DirDiff;

/// Transfer and renaming errors.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    /// A target exists and differs from its source. Nothing of the modality
    /// was copied.
    #[error("{target} already exists and differs from {source_path}: {diff}")]
    Conflict {
        source_path: PathBuf,
        target: PathBuf,
        diff: DirDiff,
    },

    /// The copied data does not re-validate to the same relative paths.
    #[error(
        "{modality} on {session} does not match the source after copying (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    Verification {
        modality: Modality,
        session: PathBuf,
        missing: Vec<PathBuf>,
        unexpected: Vec<PathBuf>,
    },

    #[error("Cannot transfer {modality} of {session}: {reason}")]
    NothingToTransfer {
        modality: Modality,
        session: PathBuf,
        reason: String,
    },

    #[error("{path} is not under {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Session path must be inside the raw directory of the local root: {0}")]
    WrongLevel(PathBuf),

    #[error("{what} does not exist: {path}")]
    MissingDirectory { what: String, path: PathBuf },

    #[error("Aborting renaming: {to} already exists (would rename {from})")]
    AlreadyExists { from: PathBuf, to: PathBuf },

    #[error("Do not rename {what} if you're not uploading them.")]
    RenameNotAllowed { what: String },

    #[error("Video files found in more than one folder: {folders:?}")]
    AmbiguousVideoFolders { folders: Vec<PathBuf> },

    #[error("Could not determine the camera index of {0}")]
    BadCameraFile(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),
}
