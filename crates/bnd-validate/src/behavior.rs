//! Behavioral data: pyControl task log, per-device event logs and the
//! optional task folder.

use std::path::{Path, PathBuf};

use bnd_core::naming::{EVENT_LOG_EXTENSION, TASK_FOLDER, TASK_LOG_EXTENSION, TASK_SCRIPT_EXTENSION};
use bnd_core::{
    Diagnostic, DiagnosticKind, Modality, SessionName, SessionRules, SubjectId, Validated,
};

use crate::error::ValidationError;
use crate::session::validate_session_path;
use crate::walk::{self, WalkMode};

/// Validate the behavioral files of a session.
///
/// Returns the task log, the event logs and the task script (if any).
///
/// # Errors
///
/// Fails on an invalid session name, a root file with a behavioral extension
/// that neither belongs to the session nor is whitelisted, a wrong number of
/// event logs or task logs, or a task folder without exactly one script.
pub fn validate_behavior(
    session_path: &Path,
    subject: &SubjectId,
    rules: &SessionRules,
) -> Result<Validated<Vec<PathBuf>>, ValidationError> {
    let session = validate_session_path(session_path, subject)?;
    let root_files: Vec<PathBuf> = walk::list_dir(session_path, WalkMode::Visible)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect();

    let event_logs = matching_root_files(&root_files, EVENT_LOG_EXTENSION, &session, rules, |n| {
        session.is_event_log(n)
    })?;
    expect_count(EVENT_LOG_EXTENSION, rules.device_count, event_logs.len())?;

    let task_logs = matching_root_files(&root_files, TASK_LOG_EXTENSION, &session, rules, |n| {
        session.is_task_log(n)
    })?;
    expect_count(TASK_LOG_EXTENSION, 1, task_logs.len())?;

    let mut files: Vec<PathBuf> = task_logs.into_iter().chain(event_logs).collect();
    let mut diagnostics = Vec::new();

    let task_folder = session_path.join(TASK_FOLDER);
    if task_folder.is_dir() {
        files.push(find_task_script(&task_folder)?);
    } else {
        tracing::debug!(session = %session, "no task folder");
        diagnostics.push(Diagnostic::new(
            Modality::Behavior,
            DiagnosticKind::MissingTaskFolder,
            session_path,
            format!("No PyControl task folder found in {}", session_path.display()),
        ));
    }

    files.sort();
    Ok(Validated::with_diagnostics(files, diagnostics))
}

/// Root files with `extension` that match `belongs`. Whitelisted names are
/// skipped; any other file with the extension is an error.
fn matching_root_files(
    root_files: &[PathBuf],
    extension: &str,
    session: &SessionName,
    rules: &SessionRules,
    belongs: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>, ValidationError> {
    let mut matching = Vec::new();
    for path in root_files {
        if path.extension().is_none_or(|ext| ext != extension) {
            continue;
        }
        let name = walk::file_name(path);
        if rules.is_whitelisted_root_file(&name, session) {
            continue;
        }
        if !belongs(&name) {
            return Err(ValidationError::UnmatchedBehaviorFile {
                extension: extension.to_string(),
                path: path.clone(),
            });
        }
        matching.push(path.clone());
    }
    Ok(matching)
}

fn expect_count(extension: &str, expected: usize, found: usize) -> Result<(), ValidationError> {
    if expected == found {
        Ok(())
    } else {
        Err(ValidationError::WrongFileCount {
            extension: extension.to_string(),
            expected,
            found,
        })
    }
}

fn find_task_script(task_folder: &Path) -> Result<PathBuf, ValidationError> {
    let mut scripts = walk::list_dir(task_folder, WalkMode::Visible)?
        .into_iter()
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == TASK_SCRIPT_EXTENSION));

    let Some(script) = scripts.next() else {
        return Err(ValidationError::NoTaskScript(task_folder.to_path_buf()));
    };
    if scripts.next().is_some() {
        return Err(ValidationError::TooManyTaskScripts(task_folder.to_path_buf()));
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SessionTree;
    use pretty_assertions::assert_eq;

    const SESSION: &str = "M015_2023_08_15_16_00";

    fn validate(tree: &SessionTree) -> Result<Validated<Vec<PathBuf>>, ValidationError> {
        validate_behavior(&tree.path(), tree.subject(), &SessionRules::default())
    }

    #[test]
    fn happy_path_returns_logs_and_script() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior();

        let validated = validate(&tree).unwrap();
        let names: Vec<String> = validated
            .value
            .iter()
            .map(|p| p.strip_prefix(tree.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "M015_2023_08_15_16_00.txt",
                "M015_2023_08_15_16_00_MotSen0-X.pca",
                "M015_2023_08_15_16_00_MotSen0-Y.pca",
                "run_task-task_files/task.py",
            ]
        );
        assert!(validated.diagnostics.is_empty());
    }

    #[test]
    fn whitelisted_txt_files_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior()
            .file("comment.txt")
            .file(&format!("{SESSION}_traj_plan.txt"));

        let validated = validate(&tree).unwrap();
        assert_eq!(validated.value.len(), 4);
    }

    #[test]
    fn foreign_txt_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior().file("notes.txt");

        let err = validate(&tree).unwrap_err();
        assert!(
            err.to_string()
                .contains("does not match expected pattern for PyControl .txt files")
        );
    }

    #[test]
    fn event_log_with_bad_name_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior().file(&format!("{SESSION}_MotSen0-Z.pca"));

        let err = validate(&tree).unwrap_err();
        assert!(
            err.to_string()
                .contains("does not match expected pattern for PyControl .pca files")
        );
    }

    #[test]
    fn wrong_event_log_count_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior()
            .file(&format!("{SESSION}_MotSen1-X.pca"));

        let err = validate(&tree).unwrap_err();
        assert_eq!(err.to_string(), "Expected 2 files with extension .pca. Found 3");
    }

    #[test]
    fn device_count_comes_from_rules() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior()
            .file(&format!("{SESSION}_MotSen1-X.pca"))
            .file(&format!("{SESSION}_MotSen1-Y.pca"));

        let rules = SessionRules {
            device_count: 4,
            ..SessionRules::default()
        };
        let validated = validate_behavior(&tree.path(), tree.subject(), &rules).unwrap();
        assert_eq!(validated.value.len(), 6);
    }

    #[test]
    fn two_task_logs_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior().file(&format!("{SESSION}_second.txt"));

        let err = validate(&tree).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::WrongFileCount {
                expected: 1,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn missing_task_folder_is_a_diagnostic() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.file(&format!("{SESSION}.txt"))
            .file(&format!("{SESSION}_MotSen0-X.pca"))
            .file(&format!("{SESSION}_MotSen0-Y.pca"));

        let validated = validate(&tree).unwrap();
        assert!(validated.has_kind(DiagnosticKind::MissingTaskFolder));
        assert_eq!(validated.value.len(), 3);
    }

    #[test]
    fn two_task_scripts_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior().file(&format!("{TASK_FOLDER}/other.py"));

        let err = validate(&tree).unwrap_err();
        assert!(err.to_string().contains("more than one .py file"));
    }

    #[test]
    fn empty_task_folder_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.file(&format!("{SESSION}.txt"))
            .file(&format!("{SESSION}_MotSen0-X.pca"))
            .file(&format!("{SESSION}_MotSen0-Y.pca"))
            .file(&format!("{TASK_FOLDER}/readme.md"));

        let err = validate(&tree).unwrap_err();
        assert!(err.to_string().contains("Could not find any .py files"));
    }

    #[test]
    fn hidden_files_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let tree = SessionTree::new(tmp.path(), SESSION);
        tree.with_behavior().file("._notes.txt");

        assert!(validate(&tree).is_ok());
    }
}
