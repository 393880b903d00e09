//! Structural validation errors.
//!
//! Every variant is a hard failure: it aborts validation of the modality (and
//! of the session, when raised through [`crate::validate_session`]).

use std::path::PathBuf;

use bnd_core::{NamingError, ProcessingLevel};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// An identifier does not match its grammar.
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("Session folder does not exist: {0}")]
    SessionNotFound(PathBuf),

    #[error("At least one data type must be checked.")]
    NothingRequested,

    #[error("Validation of {0} sessions is not supported, only raw")]
    UnsupportedLevel(ProcessingLevel),

    // -- behavior ----------------------------------------------------------
    #[error(
        "Filename does not match expected pattern for PyControl .{extension} files and is not in the whitelist: {path}"
    )]
    UnmatchedBehaviorFile { extension: String, path: PathBuf },

    #[error("Expected {expected} files with extension .{extension}. Found {found}")]
    WrongFileCount {
        extension: String,
        expected: usize,
        found: usize,
    },

    #[error("Found more than one .py file in task folder {0}")]
    TooManyTaskScripts(PathBuf),

    #[error("Could not find any .py files in task folder {0}")]
    NoTaskScript(PathBuf),

    // -- ephys -------------------------------------------------------------
    #[error("Only folders are allowed in the ephys recordings folder, found {0}")]
    StrayFileInRecording(PathBuf),

    #[error(
        "Files in probe directory do not match the expected pattern. {probe} (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    ProbeFilesMismatch {
        probe: PathBuf,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("{0} is not in any known recording folders.")]
    OrphanStreamFile(PathBuf),

    // -- video -------------------------------------------------------------
    #[error("No video files found in video folder: {0}")]
    NoVideoFiles(PathBuf),

    #[error("Could not find metadata.csv in video folder {0}")]
    MissingVideoMetadata(PathBuf),

    #[error("Found unexpected files in video folder {folder}: {files:?}")]
    UnexpectedVideoFolderFiles { folder: PathBuf, files: Vec<String> },

    #[error("Found {kind} file in unexpected location: {path}. Expected it to be in {expected}")]
    MisplacedVideoFile {
        kind: String,
        path: PathBuf,
        expected: PathBuf,
    },

    // -- queries -----------------------------------------------------------
    #[error("No valid sessions found for subject {subject} in {path}")]
    NoSessions { subject: String, path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),
}
