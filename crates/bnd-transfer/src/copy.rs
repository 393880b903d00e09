//! Copying that keeps access and modification times.

use std::fs::{self, File, FileTimes, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use bnd_validate::walk::{self, EntryKind, WalkMode};
use serde::Serialize;

use crate::error::TransferError;

/// What a copy wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyStats {
    pub files: usize,
    pub bytes: u64,
}

impl CopyStats {
    pub const fn add(&mut self, other: Self) {
        self.files += other.files;
        self.bytes += other.bytes;
    }
}

/// Copy one file, creating missing parents, and carry over its timestamps.
///
/// # Errors
///
/// Any I/O error reading the source or writing the target.
pub fn copy_file_preserving(source: &Path, target: &Path) -> Result<CopyStats, TransferError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = fs::copy(source, target)?;

    let metadata = fs::metadata(source)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    open_for_times(target)?.set_times(times)?;

    Ok(CopyStats { files: 1, bytes })
}

/// Read-only copies cannot be opened for writing; unix only needs ownership
/// to set times, so fall back to a read handle.
fn open_for_times(path: &Path) -> std::io::Result<File> {
    match OpenOptions::new().write(true).open(path) {
        Err(err) if err.kind() == ErrorKind::PermissionDenied => File::open(path),
        other => other,
    }
}

/// Recreate the subtree of `source` at `target`.
///
/// Symlinks to files are copied as the file they point to; other symlinks
/// are skipped with a warning.
///
/// # Errors
///
/// The first walk or I/O error. Files copied before it stay in place.
pub fn copy_tree(source: &Path, target: &Path) -> Result<CopyStats, TransferError> {
    fs::create_dir_all(target)?;
    let mut stats = CopyStats::default();

    for entry in walk::walk_tree(source, WalkMode::All)? {
        let Ok(relative) = entry.path.strip_prefix(source) else {
            continue;
        };
        let destination = target.join(relative);
        match entry.kind {
            EntryKind::Dir => fs::create_dir_all(&destination)?,
            EntryKind::File => stats.add(copy_file_preserving(&entry.path, &destination)?),
            EntryKind::Symlink if entry.path.is_file() => {
                stats.add(copy_file_preserving(&entry.path, &destination)?);
            }
            EntryKind::Symlink => {
                tracing::warn!(path = %entry.path.display(), "skipping symlink that is not a file");
            }
        }
    }
    Ok(stats)
}

/// Copy a file or a directory tree.
///
/// # Errors
///
/// See [`copy_file_preserving`] and [`copy_tree`].
pub fn copy_path(source: &Path, target: &Path) -> Result<CopyStats, TransferError> {
    let stats = if source.is_dir() {
        copy_tree(source, target)?
    } else {
        copy_file_preserving(source, target)?
    };
    tracing::info!(
        source = %source.display(),
        target = %target.display(),
        files = stats.files,
        bytes = stats.bytes,
        "copied"
    );
    Ok(stats)
}
