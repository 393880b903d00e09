//! Malformed-name errors.
//!
//! Raised by the pure grammars in [`crate::naming`]. Structural errors (wrong
//! file counts, stray files) live in `bnd-validate`, transfer errors in
//! `bnd-transfer`. Each variant names the grammar rule that was violated.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// Subject codes are exactly four ASCII letters or digits.
    #[error("Invalid subject code '{subject}': expected 4 letters or digits")]
    InvalidSubject { subject: String },

    #[error(
        "Folder name has to start with subject name. Got {name} with subject name {subject}"
    )]
    MissingSubjectPrefix { name: String, subject: String },

    #[error("Folder name has to have an underscore after subject name. Got {name}.")]
    MissingUnderscore { name: String },

    /// The date segment does not parse, or does not round-trip to itself
    /// (e.g. missing zero padding).
    #[error("{found} doesn't match expected format of {expected}")]
    BadDate { found: String, expected: String },

    #[error("Could not extract correct recording ID from {name}")]
    BadRecordingId { name: String },

    #[error("Folder name {name} does not match expected format {expected}")]
    RecordingSessionMismatch { name: String, expected: String },

    #[error("The following folder name doesn't match the expected format for probes: {name}")]
    BadProbe { name: String },

    #[error("Video filename does not start with {prefix}: {name}")]
    BadCameraPrefix { name: String, prefix: String },

    #[error("Could not extract camera index from video filename: {name}")]
    BadCameraIndex { name: String },

    #[error("Extra file name {name} does not start with session name {session}")]
    MissingSessionPrefix { name: String, session: String },
}
