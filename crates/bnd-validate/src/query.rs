//! Session listing: what sessions a subject has, the latest one, and what
//! was recorded on a given day.

use std::path::{Path, PathBuf};

use bnd_core::naming::SESSION_DAY_FORMAT;
use bnd_core::{SessionName, SessionRules, SubjectId};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ValidationError;
use crate::walk::{self, WalkMode};

/// Folders of a subject directory split by whether their name is a valid
/// session of that subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionListing {
    pub valid: Vec<PathBuf>,
    pub invalid: Vec<PathBuf>,
}

/// One session found under a processing-level directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectSession {
    pub subject: String,
    pub session: String,
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, ValidationError> {
    Ok(walk::list_dir(dir, WalkMode::Visible)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect())
}

/// List the session folders of a subject.
///
/// # Errors
///
/// Fails if the subject directory cannot be read.
pub fn list_subject_sessions(
    subject_path: &Path,
    subject: &SubjectId,
) -> Result<SessionListing, ValidationError> {
    let mut listing = SessionListing::default();
    for dir in subdirectories(subject_path)? {
        match SessionName::parse(&walk::file_name(&dir), subject) {
            Ok(_) => listing.valid.push(dir),
            Err(err) => {
                tracing::debug!(path = %dir.display(), %err, "not a session folder");
                listing.invalid.push(dir);
            }
        }
    }
    Ok(listing)
}

/// The session with the latest start time. Ties keep the first by name.
///
/// # Errors
///
/// [`ValidationError::NoSessions`] if the subject has no valid session.
pub fn last_session(subject_path: &Path, subject: &SubjectId) -> Result<PathBuf, ValidationError> {
    let mut latest: Option<(SessionName, PathBuf)> = None;
    for dir in list_subject_sessions(subject_path, subject)?.valid {
        let session = SessionName::parse(&walk::file_name(&dir), subject)?;
        if latest
            .as_ref()
            .is_none_or(|(best, _)| session.started_at() > best.started_at())
        {
            latest = Some((session, dir));
        }
    }

    latest
        .map(|(_, dir)| dir)
        .ok_or_else(|| ValidationError::NoSessions {
            subject: subject.to_string(),
            path: subject_path.to_path_buf(),
        })
}

/// Names of the subject's folders that contain `day` formatted as
/// `YYYY_MM_DD`, sorted.
///
/// # Errors
///
/// Fails if the subject directory cannot be read.
pub fn sessions_on_day(subject_path: &Path, day: NaiveDate) -> Result<Vec<String>, ValidationError> {
    let needle = day.format(SESSION_DAY_FORMAT).to_string();
    Ok(subdirectories(subject_path)?
        .iter()
        .map(|p| walk::file_name(p))
        .filter(|name| name.contains(&needle))
        .collect())
}

/// Sessions of every subject under a processing-level directory recorded on
/// `day`. Ignored subject-level directories are skipped.
///
/// # Errors
///
/// Fails if the level directory or a subject directory cannot be read.
pub fn all_sessions_on_day(
    level_path: &Path,
    day: NaiveDate,
    rules: &SessionRules,
) -> Result<Vec<SubjectSession>, ValidationError> {
    let mut found = Vec::new();
    for subject_dir in subdirectories(level_path)? {
        let subject = walk::file_name(&subject_dir);
        if rules.is_ignored_subject_dir(&subject) {
            continue;
        }
        for session in sessions_on_day(&subject_dir, day)? {
            found.push(SubjectSession {
                subject: subject.clone(),
                session,
            });
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn make_dirs(root: &Path, dirs: &[&str]) {
        for dir in dirs {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
    }

    fn m015() -> SubjectId {
        SubjectId::parse("M015").unwrap()
    }

    #[test]
    fn listing_splits_valid_and_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        make_dirs(
            tmp.path(),
            &[
                "M015_2023_08_04_14_30",
                "M015_2023_08_05_10_00",
                "M015_2023_8_06_10_00",
                "scratch",
            ],
        );
        fs::write(tmp.path().join("M015_2023_08_07_10_00"), "a file").unwrap();

        let listing = list_subject_sessions(tmp.path(), &m015()).unwrap();
        assert_eq!(listing.valid.len(), 2);
        assert_eq!(
            listing
                .invalid
                .iter()
                .map(|p| walk::file_name(p))
                .collect::<Vec<_>>(),
            vec!["M015_2023_8_06_10_00", "scratch"]
        );
    }

    #[test]
    fn last_session_picks_latest_start() {
        let tmp = tempfile::tempdir().unwrap();
        make_dirs(
            tmp.path(),
            &[
                "M015_2023_08_04_14_30",
                "M015_2023_08_05_09_00",
                "M015_2023_08_05_10_00",
                "M015_2023_09_01_00_00_bad",
            ],
        );

        let last = last_session(tmp.path(), &m015()).unwrap();
        assert_eq!(walk::file_name(&last), "M015_2023_08_05_10_00");
    }

    #[test]
    fn last_session_without_sessions_fails() {
        let tmp = tempfile::tempdir().unwrap();
        make_dirs(tmp.path(), &["notes"]);

        let err = last_session(tmp.path(), &m015()).unwrap_err();
        assert!(matches!(err, ValidationError::NoSessions { .. }));
    }

    #[test]
    fn sessions_on_day_matches_date_segment() {
        let tmp = tempfile::tempdir().unwrap();
        make_dirs(
            tmp.path(),
            &[
                "M015_2023_08_04_14_30",
                "M015_2023_08_04_16_00",
                "M015_2023_08_05_10_00",
            ],
        );

        let day = NaiveDate::from_ymd_opt(2023, 8, 4).unwrap();
        assert_eq!(
            sessions_on_day(tmp.path(), day).unwrap(),
            vec!["M015_2023_08_04_14_30", "M015_2023_08_04_16_00"]
        );
    }

    #[test]
    fn all_sessions_on_day_skips_ignored_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        make_dirs(
            tmp.path(),
            &[
                "M015/M015_2023_08_04_14_30",
                "M016/M016_2023_08_04_09_00",
                "M016/M016_2023_08_03_09_00",
                "treadmill-calibration/calib_2023_08_04_10_00",
            ],
        );

        let day = NaiveDate::from_ymd_opt(2023, 8, 4).unwrap();
        let found = all_sessions_on_day(tmp.path(), day, &SessionRules::default()).unwrap();
        assert_eq!(
            found,
            vec![
                SubjectSession {
                    subject: "M015".to_string(),
                    session: "M015_2023_08_04_14_30".to_string(),
                },
                SubjectSession {
                    subject: "M016".to_string(),
                    session: "M016_2023_08_04_09_00".to_string(),
                },
            ]
        );
    }
}
