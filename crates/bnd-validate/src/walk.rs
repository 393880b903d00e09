//! Directory walking for session trees.
//!
//! Uses the `ignore` crate with every standard filter disabled: session trees
//! are data, not source code, so `.gitignore` files inside them mean nothing.
//!
//! ## Walking modes
//!
//! - `All`: every entry, including hidden files. Used when copying and
//!   comparing trees, where nothing may be silently left out.
//! - `Visible`: skips entries whose name starts with `.` (and everything
//!   below a hidden directory). Used by the validators, which ignore OS
//!   litter such as `.DS_Store`.
//!
//! Results are sorted by file name at every level so that output and error
//! order are deterministic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Walking mode for the tree walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    All,
    Visible,
}

/// Kind of a walked entry. Symlinks are reported, never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// True for names that start with a dot.
#[must_use]
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Build a walker over `root`. The root itself is yielded first at depth 0.
pub fn build_walker(root: &Path, mode: WalkMode) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(false);
    builder.follow_links(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    if mode == WalkMode::Visible {
        // The root may live under a hidden directory (temp dirs do); only
        // filter what is below it.
        builder.filter_entry(|entry| {
            entry.depth() == 0 || !is_hidden(&entry.file_name().to_string_lossy())
        });
    }

    builder.build()
}

/// Every entry strictly below `root`, parents before children.
///
/// # Errors
///
/// Returns the first walk error (unreadable directory, vanished entry).
pub fn walk_tree(root: &Path, mode: WalkMode) -> Result<Vec<TreeEntry>, ignore::Error> {
    let mut entries = Vec::new();
    for entry in build_walker(root, mode) {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        entries.push(TreeEntry {
            path: entry.into_path(),
            kind,
        });
    }
    Ok(entries)
}

/// Regular files strictly below `root`, sorted.
///
/// # Errors
///
/// Returns the first walk error.
pub fn files_below(root: &Path, mode: WalkMode) -> Result<Vec<PathBuf>, ignore::Error> {
    let mut files: Vec<PathBuf> = walk_tree(root, mode)?
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::File)
        .map(|entry| entry.path)
        .collect();
    files.sort();
    Ok(files)
}

/// Immediate children of `dir`, sorted, optionally skipping hidden names.
///
/// # Errors
///
/// Returns any error from reading the directory.
pub fn list_dir(dir: &Path, mode: WalkMode) -> io::Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if mode == WalkMode::Visible && is_hidden(&entry.file_name().to_string_lossy()) {
            continue;
        }
        children.push(entry.path());
    }
    children.sort();
    Ok(children)
}

/// File name of `path` as a string, lossily converted.
#[must_use]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
