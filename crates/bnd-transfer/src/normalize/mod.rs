//! Renamers that bring a freshly recorded session into canonical form.
//!
//! Both are idempotent: on an already canonical session they return an
//! empty list and touch nothing. Renaming happens before validation.

mod extra;
mod video;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::TransferError;

pub use extra::rename_extra_files;
pub use video::rename_raw_videos;

/// One performed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Move `from` to `to`, refusing to overwrite.
fn move_path(from: &Path, to: &Path) -> Result<Rename, TransferError> {
    if to.exists() {
        return Err(TransferError::AlreadyExists {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }
    fs::rename(from, to)?;
    tracing::info!(from = %from.display(), to = %to.display(), "renamed");
    Ok(Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
    })
}
