//! # bnd-validate
//!
//! Validation of session trees against the lab's directory convention.
//!
//! Every validator derives its result fresh from the filesystem and never
//! mutates it. Hard failures are [`ValidationError`]s; soft findings travel
//! as diagnostics inside [`bnd_core::Validated`].
//!
//! - [`behavior`], [`ephys`], [`video`], [`extra`]: one validator per modality
//! - [`session`]: composes the modality validators for a whole session
//! - [`query`]: listing sessions of a subject or of a day
//! - [`batch`]: validating many sessions with per-session failure isolation
//! - [`walk`]: unfiltered, sorted directory walking shared with `bnd-transfer`

pub mod batch;
pub mod behavior;
pub mod ephys;
pub mod error;
pub mod extra;
pub mod query;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod video;
pub mod walk;

pub use batch::{BatchReport, SessionOutcome, SessionReport};
pub use error::ValidationError;
pub use session::{
    ModalityPaths, ModalitySelection, validate_modality, validate_session, validate_session_path,
};
