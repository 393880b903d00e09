//! Soft diagnostics: non-fatal findings that travel alongside a result.
//!
//! Hard failures are errors and abort the enclosing operation. Anything that
//! is unusual but not invalid becomes a [`Diagnostic`] inside a
//! [`Validated`] value; callers decide how to surface it.

use std::path::PathBuf;

use serde::Serialize;

use crate::enums::Modality;

/// What kind of non-fatal condition was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The legacy task folder is absent.
    MissingTaskFolder,
    /// More than one recording folder in one session.
    MultipleRecordings,
    /// No recording folder in the session.
    NoRecordings,
    /// No video folder in the session.
    MissingVideoFolder,
    /// A modality was left out of a transfer because its source is empty or invalid.
    SkippedModality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub modality: Modality,
    pub kind: DiagnosticKind,
    pub path: PathBuf,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        modality: Modality,
        kind: DiagnosticKind,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            modality,
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A successful result together with the diagnostics gathered on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validated<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Validated<T> {
    #[must_use]
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    #[must_use]
    pub fn has_kind(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    /// Transform the value, keeping the diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        Validated {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Move the diagnostics into `sink` and return the bare value.
    pub fn collect_into(self, sink: &mut Vec<Diagnostic>) -> T {
        sink.extend(self.diagnostics);
        self.value
    }
}
