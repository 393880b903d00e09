use std::path::{Path, PathBuf};

use bnd_core::{ExtraFileName, SessionName, SessionRules};
use bnd_validate::extra::files_with_allowed_extensions;
use bnd_validate::{ValidationError, walk};

use super::{Rename, move_path};
use crate::error::TransferError;

/// Prefix extra files with the session name.
///
/// Covers whitelisted files at the session root and allowed-extension files
/// below it. Files already starting with the session name are left alone.
/// All targets are checked before the first move.
///
/// # Errors
///
/// [`TransferError::AlreadyExists`] if any target name is taken; nothing is
/// renamed in that case.
pub fn rename_extra_files(
    session_path: &Path,
    rules: &SessionRules,
) -> Result<Vec<Rename>, TransferError> {
    if !session_path.is_dir() {
        return Err(ValidationError::SessionNotFound(session_path.to_path_buf()).into());
    }
    let session = SessionName::parse_inferred(&walk::file_name(session_path))?;

    let mut planned: Vec<(PathBuf, PathBuf)> = Vec::new();
    for allowed in &rules.whitelisted_files_in_root {
        let bare = session_path.join(allowed);
        if bare.is_file() {
            let target = session_path.join(ExtraFileName::canonical(&session, allowed));
            planned.push((bare, target));
        }
    }
    for file in files_with_allowed_extensions(session_path, rules)? {
        let name = walk::file_name(&file);
        if ExtraFileName::is_canonical(&name, &session) {
            continue;
        }
        if let Some(parent) = file.parent() {
            let target = parent.join(ExtraFileName::canonical(&session, &name));
            planned.push((file, target));
        }
    }

    if let Some((from, to)) = planned.iter().find(|(_, to)| to.exists()) {
        return Err(TransferError::AlreadyExists {
            from: from.clone(),
            to: to.clone(),
        });
    }

    planned
        .iter()
        .map(|(from, to)| move_path(from, to))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bnd_validate::test_support::{SessionTree, relative_files};
    use pretty_assertions::assert_eq;

    const SESSION: &str = "M011_2023_04_04_16_00";

    #[test]
    fn prefixes_whitelisted_and_nested_files() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.file("comment.txt")
            .file("sub/run.log")
            .file(&format!("sub/{SESSION}_already.txt"))
            .file("sub/image.png")
            .file("unlisted.txt");

        let moves = rename_extra_files(&tree.path(), &SessionRules::default()).unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(
            relative_files(&tree.path()),
            vec![
                format!("{SESSION}_comment.txt"),
                "sub/M011_2023_04_04_16_00_already.txt".to_string(),
                "sub/M011_2023_04_04_16_00_run.log".to_string(),
                "sub/image.png".to_string(),
                "unlisted.txt".to_string(),
            ]
        );
    }

    #[test]
    fn second_run_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.file("trajectory.txt").file("sub/notes.txt");

        assert_eq!(
            rename_extra_files(&tree.path(), &SessionRules::default())
                .unwrap()
                .len(),
            2
        );
        let after_first = relative_files(&tree.path());
        assert!(
            rename_extra_files(&tree.path(), &SessionRules::default())
                .unwrap()
                .is_empty()
        );
        assert_eq!(relative_files(&tree.path()), after_first);
    }

    #[test]
    fn taken_target_aborts_before_any_move() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.file("comment.txt")
            .file(&format!("{SESSION}_comment.txt"))
            .file("sub/notes.txt");
        let before = relative_files(&tree.path());

        let err = rename_extra_files(&tree.path(), &SessionRules::default()).unwrap_err();
        assert!(err.to_string().contains("Aborting renaming"));
        assert_eq!(relative_files(&tree.path()), before);
    }
}
