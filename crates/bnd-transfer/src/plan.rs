//! Transfer planning: swap the root prefix, keep the relative path.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::TransferError;

/// One source path and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCopy {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// `path` relative to `root`.
///
/// # Errors
///
/// [`TransferError::OutsideRoot`] if `path` is not below `root`.
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> Result<&'a Path, TransferError> {
    path.strip_prefix(root)
        .map_err(|_| TransferError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })
}

/// The counterpart of `path` under `to_root`.
///
/// # Errors
///
/// [`TransferError::OutsideRoot`] if `path` is not below `from_root`.
pub fn mirror_path(path: &Path, from_root: &Path, to_root: &Path) -> Result<PathBuf, TransferError> {
    Ok(to_root.join(relative_to(path, from_root)?))
}

/// Plan copies of `paths` from `from_root` to `to_root`.
///
/// # Errors
///
/// [`TransferError::OutsideRoot`] on the first path not below `from_root`.
pub fn plan_transfer(
    paths: &[PathBuf],
    from_root: &Path,
    to_root: &Path,
) -> Result<Vec<PlannedCopy>, TransferError> {
    paths
        .iter()
        .map(|source| {
            Ok(PlannedCopy {
                source: source.clone(),
                target: mirror_path(source, from_root, to_root)?,
            })
        })
        .collect()
}

/// Relative path set of `paths` below `root`.
///
/// # Errors
///
/// [`TransferError::OutsideRoot`] on the first path not below `root`.
pub fn relative_set(paths: &[PathBuf], root: &Path) -> Result<BTreeSet<PathBuf>, TransferError> {
    paths
        .iter()
        .map(|p| relative_to(p, root).map(Path::to_path_buf))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mirror_keeps_relative_path() {
        let target = mirror_path(
            Path::new("/data/local/raw/M017/M017_2024_03_12_18_45/a.txt"),
            Path::new("/data/local"),
            Path::new("/mnt/remote"),
        )
        .unwrap();
        assert_eq!(
            target,
            PathBuf::from("/mnt/remote/raw/M017/M017_2024_03_12_18_45/a.txt")
        );
    }

    #[test]
    fn path_outside_root_is_rejected() {
        let err = mirror_path(
            Path::new("/elsewhere/raw/M017"),
            Path::new("/data/local"),
            Path::new("/mnt/remote"),
        )
        .unwrap_err();
        assert!(matches!(err, TransferError::OutsideRoot { .. }));
    }

    #[test]
    fn plan_preserves_order() {
        let paths = vec![
            PathBuf::from("/l/raw/M017/s/b"),
            PathBuf::from("/l/raw/M017/s/a"),
        ];
        let plan = plan_transfer(&paths, Path::new("/l"), Path::new("/r")).unwrap();
        assert_eq!(
            plan.iter().map(|p| p.target.clone()).collect::<Vec<_>>(),
            vec![
                PathBuf::from("/r/raw/M017/s/b"),
                PathBuf::from("/r/raw/M017/s/a")
            ]
        );
    }

    #[test]
    fn relative_set_strips_root() {
        let paths = vec![PathBuf::from("/l/s/x"), PathBuf::from("/l/s/y/z")];
        let set = relative_set(&paths, Path::new("/l/s")).unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![PathBuf::from("x"), PathBuf::from("y/z")]
        );
    }
}
