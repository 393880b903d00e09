//! # bnd-core
//!
//! Foundational types shared by every bnd crate.
//!
//! - Naming grammars for subjects, sessions, recordings, probes, cameras and
//!   extra files (pure, no I/O)
//! - Processing level and modality enums
//! - Session rules (whitelists, allowed extensions, device count)
//! - Soft diagnostics and the `Validated<T>` carrier
//! - The malformed-name error type

pub mod diagnostics;
pub mod enums;
pub mod errors;
pub mod naming;
pub mod rules;

pub use diagnostics::{Diagnostic, DiagnosticKind, Validated};
pub use enums::{Modality, ProcessingLevel};
pub use errors::NamingError;
pub use naming::{
    CameraFileName, ExtraFileName, ProbeName, RecordingName, SessionName, SubjectId,
};
pub use rules::SessionRules;
