//! # bnd-transfer
//!
//! Moves validated session data between the local and the remote storage
//! root without silent loss or corruption.
//!
//! - [`normalize`]: idempotent renamers run before validation
//! - [`plan`]: pure root-swapping of validated paths
//! - [`diff`]: byte-level comparison of files and directory trees
//! - [`copy`]: copying that preserves access and modification times
//! - [`sync`]: conflict check, copy and re-validation per modality, plus
//!   whole-session upload and download
//! - [`batch`]: uploading many sessions with per-session failure isolation

pub mod batch;
pub mod copy;
pub mod diff;
pub mod error;
pub mod normalize;
pub mod plan;
pub mod sync;

pub use diff::DirDiff;
pub use error::TransferError;
pub use normalize::Rename;
pub use plan::PlannedCopy;
pub use sync::{
    Direction, ModalityTransfer, SyncExecutor, TransferReport, UploadOptions, sync_subject_dir,
};
