//! Byte-level comparison of files and directory trees.
//!
//! Hidden files take part: a diff must never call two trees equal when a
//! copy would change what is on disk.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use bnd_validate::walk::{self, EntryKind, WalkMode};
use serde::Serialize;

use crate::error::TransferError;

const CHUNK: usize = 64 * 1024;

/// Difference between a source and a target, in paths relative to each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirDiff {
    /// Present in the source, absent from the target.
    pub missing: Vec<PathBuf>,
    /// Present in the target, absent from the source.
    pub extra: Vec<PathBuf>,
    /// Present in both with different contents or kinds.
    pub differing: Vec<PathBuf>,
}

impl DirDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.differing.is_empty()
    }
}

impl fmt::Display for DirDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("identical");
        }
        let mut parts = Vec::new();
        for (label, paths) in [
            ("missing", &self.missing),
            ("extra", &self.extra),
            ("differing", &self.differing),
        ] {
            if !paths.is_empty() {
                let shown: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                parts.push(format!("{label}: {}", shown.join(", ")));
            }
        }
        f.write_str(&parts.join("; "))
    }
}

/// True if both files have identical contents.
///
/// # Errors
///
/// Any error opening or reading either file.
pub fn files_equal(a: &Path, b: &Path) -> Result<bool, TransferError> {
    if a.metadata()?.len() != b.metadata()?.len() {
        return Ok(false);
    }

    let mut left = BufReader::with_capacity(CHUNK, File::open(a)?);
    let mut right = BufReader::with_capacity(CHUNK, File::open(b)?);
    let mut left_buf = vec![0u8; CHUNK];
    let mut right_buf = vec![0u8; CHUNK];
    loop {
        let n = read_full(&mut left, &mut left_buf)?;
        let m = read_full(&mut right, &mut right_buf)?;
        if n != m || left_buf[..n] != right_buf[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows; returns the bytes read.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

fn tree_index(root: &Path) -> Result<BTreeMap<PathBuf, EntryKind>, TransferError> {
    let mut index = BTreeMap::new();
    for entry in walk::walk_tree(root, WalkMode::All)? {
        if let Ok(relative) = entry.path.strip_prefix(root) {
            index.insert(relative.to_path_buf(), entry.kind);
        }
    }
    Ok(index)
}

/// Compare `source` with an existing `target`.
///
/// Files are compared byte for byte; directories recursively by structure
/// and content. A file on one side and a directory on the other is a single
/// differing entry.
///
/// # Errors
///
/// Any error walking or reading either side.
pub fn compare_paths(source: &Path, target: &Path) -> Result<DirDiff, TransferError> {
    let mut diff = DirDiff::default();
    let name = PathBuf::from(walk::file_name(source));

    match (source.is_dir(), target.is_dir()) {
        (false, false) => {
            if !target.exists() {
                diff.missing.push(name);
            } else if !files_equal(source, target)? {
                diff.differing.push(name);
            }
        }
        (true, true) => compare_trees(source, target, &mut diff)?,
        _ => diff.differing.push(name),
    }

    Ok(diff)
}

fn compare_trees(source: &Path, target: &Path, diff: &mut DirDiff) -> Result<(), TransferError> {
    let left = tree_index(source)?;
    let right = tree_index(target)?;

    let left_keys: BTreeSet<&PathBuf> = left.keys().collect();
    let right_keys: BTreeSet<&PathBuf> = right.keys().collect();

    diff.missing
        .extend(left_keys.difference(&right_keys).map(|p| (*p).clone()));
    diff.extra
        .extend(right_keys.difference(&left_keys).map(|p| (*p).clone()));

    for relative in left_keys.intersection(&right_keys) {
        let (kind_l, kind_r) = (left[*relative], right[*relative]);
        let same = match (kind_l, kind_r) {
            (EntryKind::Dir, EntryKind::Dir) => true,
            (EntryKind::Dir, _) | (_, EntryKind::Dir) => false,
            _ => files_equal(&source.join(relative), &target.join(relative))?,
        };
        if !same {
            diff.differing.push((*relative).clone());
        }
    }
    Ok(())
}
