//! Whole-session validation against synthetic trees: the conforming scenario
//! and the cataloged violations.

use bnd_core::{DiagnosticKind, Modality, NamingError, SessionRules, SubjectId, Validated};
use bnd_validate::test_support::{SESSION, SessionTree, relative_files};
use bnd_validate::{ModalityPaths, ModalitySelection, ValidationError, validate_session};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn validate_raw(tree: &SessionTree) -> Result<Validated<ModalityPaths>, ValidationError> {
    validate_session(
        &tree.path(),
        tree.subject(),
        &ModalitySelection::raw_data(),
        &SessionRules::default(),
    )
}

#[test]
fn conforming_session_validates_every_modality() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);

    let validated = validate_raw(&tree).unwrap();
    assert!(validated.diagnostics.is_empty());
    for modality in [Modality::Behavior, Modality::Ephys, Modality::Video] {
        assert!(
            !validated.value.get(modality).unwrap().is_empty(),
            "{modality} should have paths"
        );
    }
    assert_eq!(validated.value.get(Modality::ExtraFiles), None);
}

#[test]
fn validation_does_not_touch_the_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);
    let before = relative_files(&tree.path());

    validate_raw(&tree).unwrap();
    assert_eq!(relative_files(&tree.path()), before);
}

#[rstest]
#[case::subject_prefix("M016_2024_03_12_18_45", "Folder name has to start with subject name")]
#[case::underscore("M0172024_03_12_18_45", "underscore after subject name")]
#[case::date("M017_2024_3_12_18_45", "doesn't match expected format")]
fn malformed_session_names_fail(#[case] folder: &str, #[case] message: &str) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(folder);
    std::fs::create_dir(&path).unwrap();

    let subject = SubjectId::parse("M017").unwrap();
    let err = validate_session(
        &path,
        &subject,
        &ModalitySelection::raw_data(),
        &SessionRules::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::Naming(_)));
    assert!(err.to_string().contains(message), "{err}");
}

#[test]
fn wrong_event_log_count_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);
    std::fs::remove_file(tree.path().join(format!("{SESSION}_MotSen0-Y.pca"))).unwrap();

    let err = validate_raw(&tree).unwrap_err();
    assert!(
        err.to_string()
            .contains("Expected 2 files with extension .pca. Found 1")
    );
}

#[test]
fn two_task_scripts_fail() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);
    tree.file("run_task-task_files/second.py");

    assert!(matches!(
        validate_raw(&tree).unwrap_err(),
        ValidationError::TooManyTaskScripts(_)
    ));
}

#[test]
fn zero_task_scripts_fail() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);
    std::fs::remove_file(tree.path().join("run_task-task_files/task.py")).unwrap();

    assert!(matches!(
        validate_raw(&tree).unwrap_err(),
        ValidationError::NoTaskScript(_)
    ));
}

#[test]
fn non_whitelisted_file_in_recording_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);
    tree.file(&format!("{SESSION}_g0/random.dat"));

    assert!(matches!(
        validate_raw(&tree).unwrap_err(),
        ValidationError::StrayFileInRecording(_)
    ));
}

#[test]
fn malformed_probe_folder_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);
    tree.dir(&format!("{SESSION}_g0/{SESSION}_g0_imec12"));

    assert!(matches!(
        validate_raw(&tree).unwrap_err(),
        ValidationError::Naming(NamingError::BadProbe { .. })
    ));
}

#[test]
fn multiple_recordings_warn_but_pass() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);
    tree.with_recording(1, &[0]);

    let validated = validate_raw(&tree).unwrap();
    assert!(validated.has_kind(DiagnosticKind::MultipleRecordings));
    assert_eq!(validated.value.get(Modality::Ephys).unwrap().len(), 2);
}

#[test]
fn ignored_modality_is_not_inspected() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = SessionTree::complete(tmp.path(), SESSION);
    tree.file(&format!("{SESSION}_g0/random.dat"));

    let selection = ModalitySelection {
        ephys: false,
        ..ModalitySelection::raw_data()
    };
    let validated = validate_session(
        &tree.path(),
        tree.subject(),
        &selection,
        &SessionRules::default(),
    )
    .unwrap();
    assert_eq!(
        validated.value.modalities(),
        vec![Modality::Behavior, Modality::Video]
    );
}
