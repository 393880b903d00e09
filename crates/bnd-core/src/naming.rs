//! Naming grammars for every identifier in a session tree.
//!
//! All functions here are pure: they look at names, never at the filesystem.
//! Each identifier class has a parsed type whose `parse` constructor either
//! returns the structured fields or a [`NamingError`] naming the violated rule.
//!
//! ```text
//! M017                                        SubjectId
//! M017_2024_03_12_18_45                       SessionName
//! M017_2024_03_12_18_45_g0                    RecordingName
//! M017_2024_03_12_18_45_g0_imec1              ProbeName
//! M017_2024_03_12_18_45_camera_2.avi          CameraFileName
//! M017_2024_03_12_18_45_comment.txt           ExtraFileName
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::errors::NamingError;

/// Date-time suffix of a session name.
pub const SESSION_DATE_FORMAT: &str = "%Y_%m_%d_%H_%M";

/// Day prefix of the date segment, used to find all sessions of a day.
pub const SESSION_DAY_FORMAT: &str = "%Y_%m_%d";

/// Suffix appended to the session name to form the video folder name.
pub const VIDEO_FOLDER_SUFFIX: &str = "_cameras";

/// Extension of raw camera recordings.
pub const VIDEO_EXTENSION: &str = "avi";

/// Camera metadata file expected next to the videos.
pub const VIDEO_METADATA_FILE: &str = "metadata.csv";

/// Label between the session name and the camera index.
pub const CAMERA_LABEL: &str = "camera";

/// Legacy folder holding the task script.
pub const TASK_FOLDER: &str = "run_task-task_files";

/// Extension of the task script inside [`TASK_FOLDER`].
pub const TASK_SCRIPT_EXTENSION: &str = "py";

/// Extension of the task log at the session root.
pub const TASK_LOG_EXTENSION: &str = "txt";

/// Extension of the per-device event logs at the session root.
pub const EVENT_LOG_EXTENSION: &str = "pca";

/// Stream files written by SpikeGLX for every probe.
pub const SPIKEGLX_ENDINGS: [&str; 4] = [".ap.bin", ".ap.meta", ".lf.bin", ".lf.meta"];

static RECORDING_GATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_g(\d)$").expect("valid recording gate regex"));

static EVENT_LOG_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_MotSen(?P<device>\d)-(?P<axis>X|Y)\.pca$").expect("valid event log regex")
});

/// True if `name` ends with a SpikeGLX stream file ending.
#[must_use]
pub fn is_spikeglx_stream_file(name: &str) -> bool {
    SPIKEGLX_ENDINGS.iter().any(|ending| name.ends_with(ending))
}

// ---------------------------------------------------------------------------
// SubjectId
// ---------------------------------------------------------------------------

/// Four-character subject code, e.g. `M017`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectId(String);

impl SubjectId {
    pub const LEN: usize = 4;

    /// Parse a subject code: exactly four ASCII letters or digits.
    ///
    /// # Errors
    ///
    /// Returns [`NamingError::InvalidSubject`] for any other string.
    pub fn parse(raw: &str) -> Result<Self, NamingError> {
        if raw.len() == Self::LEN && raw.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(NamingError::InvalidSubject {
                subject: raw.to_string(),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// SessionName
// ---------------------------------------------------------------------------

/// `<subject>_<YYYY>_<MM>_<DD>_<HH>_<MM>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionName {
    name: String,
    subject: SubjectId,
    started_at: NaiveDateTime,
}

impl SessionName {
    /// Parse a session folder name that must belong to `subject`.
    ///
    /// Rules, checked in order:
    /// 1. the name starts with the subject code,
    /// 2. an underscore follows the subject code,
    /// 3. the rest is a zero-padded `%Y_%m_%d_%H_%M` date.
    ///
    /// # Errors
    ///
    /// Returns the [`NamingError`] of the first rule that fails.
    pub fn parse(name: &str, subject: &SubjectId) -> Result<Self, NamingError> {
        let Some(rest) = name.strip_prefix(subject.as_str()) else {
            return Err(NamingError::MissingSubjectPrefix {
                name: name.to_string(),
                subject: subject.to_string(),
            });
        };
        let Some(date) = rest.strip_prefix('_') else {
            return Err(NamingError::MissingUnderscore {
                name: name.to_string(),
            });
        };
        let started_at = parse_session_date(date)?;

        Ok(Self {
            name: name.to_string(),
            subject: subject.clone(),
            started_at,
        })
    }

    /// Parse a session name, taking the subject from its first four characters.
    ///
    /// # Errors
    ///
    /// Fails if the first four characters are not a valid subject code or the
    /// remainder violates [`SessionName::parse`].
    pub fn parse_inferred(name: &str) -> Result<Self, NamingError> {
        let subject = name
            .get(..SubjectId::LEN)
            .ok_or_else(|| NamingError::InvalidSubject {
                subject: name.to_string(),
            })?;
        Self::parse(name, &SubjectId::parse(subject)?)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn subject(&self) -> &SubjectId {
        &self.subject
    }

    #[must_use]
    pub const fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.started_at.date()
    }

    /// True if the session started on `day`.
    #[must_use]
    pub fn on_day(&self, day: NaiveDate) -> bool {
        self.day() == day
    }

    /// Canonical video folder name: `<session>_cameras`.
    #[must_use]
    pub fn video_folder_name(&self) -> String {
        format!("{}{VIDEO_FOLDER_SUFFIX}", self.name)
    }

    /// Prefix every canonical camera file starts with: `<session>_camera_`.
    #[must_use]
    pub fn camera_prefix(&self) -> String {
        format!("{}_{CAMERA_LABEL}_", self.name)
    }

    /// True if `name` is a task log of this session: `<session>*.txt`.
    #[must_use]
    pub fn is_task_log(&self, name: &str) -> bool {
        name.starts_with(&self.name)
            && name
                .strip_suffix(TASK_LOG_EXTENSION)
                .is_some_and(|stem| stem.ends_with('.'))
    }

    /// True if `name` is a device event log of this session:
    /// `<session>*_MotSen<d>-<X|Y>.pca`.
    #[must_use]
    pub fn is_event_log(&self, name: &str) -> bool {
        name.starts_with(&self.name) && EVENT_LOG_SUFFIX.is_match(&name[self.name.len()..])
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parse the date segment of a session name.
///
/// The segment must round-trip: `2023_8_04_16_00` parses but is rejected
/// because the canonical form is `2023_08_04_16_00`.
///
/// # Errors
///
/// Returns [`NamingError::BadDate`] if the segment does not parse or is not
/// in canonical form.
pub fn parse_session_date(raw: &str) -> Result<NaiveDateTime, NamingError> {
    let parsed = NaiveDateTime::parse_from_str(raw, SESSION_DATE_FORMAT).map_err(|_| {
        NamingError::BadDate {
            found: raw.to_string(),
            expected: SESSION_DATE_FORMAT.to_string(),
        }
    })?;

    let canonical = parsed.format(SESSION_DATE_FORMAT).to_string();
    if canonical != raw {
        return Err(NamingError::BadDate {
            found: raw.to_string(),
            expected: canonical,
        });
    }

    Ok(parsed)
}

// ---------------------------------------------------------------------------
// RecordingName
// ---------------------------------------------------------------------------

/// SpikeGLX recording folder: `<session>_g<d>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingName {
    name: String,
    gate: u8,
}

impl RecordingName {
    /// Cheap pre-filter with glob `*_g?` semantics, used to discover candidate
    /// recording folders before parsing them.
    #[must_use]
    pub fn looks_like_recording(name: &str) -> bool {
        let mut chars = name.chars();
        chars.next_back().is_some() && chars.as_str().ends_with("_g")
    }

    /// Parse a recording folder name belonging to `session`.
    ///
    /// # Errors
    ///
    /// [`NamingError::BadRecordingId`] if the name does not end in `_g<d>`,
    /// [`NamingError::RecordingSessionMismatch`] if the part before it is not
    /// the session name.
    pub fn parse(name: &str, session: &SessionName) -> Result<Self, NamingError> {
        let gate = RECORDING_GATE
            .captures(name)
            .and_then(|caps| caps[1].parse::<u8>().ok())
            .ok_or_else(|| NamingError::BadRecordingId {
                name: name.to_string(),
            })?;

        let expected = format!("{session}_g{gate}");
        if name != expected {
            return Err(NamingError::RecordingSessionMismatch {
                name: name.to_string(),
                expected,
            });
        }

        Ok(Self {
            name: name.to_string(),
            gate,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn gate(&self) -> u8 {
        self.gate
    }
}

impl fmt::Display for RecordingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// ProbeName
// ---------------------------------------------------------------------------

/// Probe subfolder of a recording: `<recording>_imec<d>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeName {
    name: String,
    recording: String,
    index: u8,
}

impl ProbeName {
    /// # Errors
    ///
    /// Returns [`NamingError::BadProbe`] unless `name` is the recording name
    /// followed by `_imec` and exactly one digit.
    pub fn parse(name: &str, recording: &RecordingName) -> Result<Self, NamingError> {
        let index = name
            .strip_prefix(recording.as_str())
            .and_then(|rest| rest.strip_prefix("_imec"))
            .filter(|digits| digits.len() == 1)
            .and_then(|digit| digit.parse::<u8>().ok())
            .ok_or_else(|| NamingError::BadProbe {
                name: name.to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            recording: recording.as_str().to_string(),
            index,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// The four stream files SpikeGLX writes into this probe folder:
    /// `<recording>_t0.imec<d>.{ap,lf}.{bin,meta}`.
    #[must_use]
    pub fn expected_stream_files(&self) -> BTreeSet<String> {
        SPIKEGLX_ENDINGS
            .iter()
            .map(|ending| format!("{}_t0.imec{}{ending}", self.recording, self.index))
            .collect()
    }
}

impl fmt::Display for ProbeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// CameraFileName
// ---------------------------------------------------------------------------

/// Canonical camera recording: `<session>_camera_<n>.avi`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraFileName {
    name: String,
    camera: u32,
}

impl CameraFileName {
    /// Build the canonical file name for camera `camera` of `session`.
    #[must_use]
    pub fn canonical(session: &SessionName, camera: u32) -> String {
        format!("{}{camera}.{VIDEO_EXTENSION}", session.camera_prefix())
    }

    /// # Errors
    ///
    /// [`NamingError::BadCameraPrefix`] if the name does not start with
    /// `<session>_camera_`, [`NamingError::BadCameraIndex`] if the rest is not
    /// `<digits>.avi`.
    pub fn parse(name: &str, session: &SessionName) -> Result<Self, NamingError> {
        let prefix = session.camera_prefix();
        let Some(rest) = name.strip_prefix(&prefix) else {
            return Err(NamingError::BadCameraPrefix {
                name: name.to_string(),
                prefix,
            });
        };

        let camera = rest
            .strip_suffix(VIDEO_EXTENSION)
            .and_then(|stem| stem.strip_suffix('.'))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| NamingError::BadCameraIndex {
                name: name.to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            camera,
        })
    }

    /// Camera index from a raw acquisition file name such as `Camera_0.avi`:
    /// the last `_`-separated token of the stem.
    #[must_use]
    pub fn index_from_raw(file_name: &str) -> Option<u32> {
        let stem = file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _)| stem);
        stem.rsplit('_').next()?.parse().ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn camera(&self) -> u32 {
        self.camera
    }
}

// ---------------------------------------------------------------------------
// ExtraFileName
// ---------------------------------------------------------------------------

/// Extra file carrying the session prefix: `<session>_<original>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtraFileName {
    name: String,
    original: String,
}

impl ExtraFileName {
    /// Canonical name of an extra file originally called `original`.
    #[must_use]
    pub fn canonical(session: &SessionName, original: &str) -> String {
        format!("{session}_{original}")
    }

    /// True if the file already starts with the session name and must not be
    /// prefixed again.
    #[must_use]
    pub fn is_canonical(name: &str, session: &SessionName) -> bool {
        name.starts_with(session.as_str())
    }

    /// # Errors
    ///
    /// Returns [`NamingError::MissingSessionPrefix`] unless `name` is
    /// `<session>_` followed by a non-empty original file name.
    pub fn parse(name: &str, session: &SessionName) -> Result<Self, NamingError> {
        let original = name
            .strip_prefix(session.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|original| !original.is_empty())
            .ok_or_else(|| NamingError::MissingSessionPrefix {
                name: name.to_string(),
                session: session.to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            original: original.to_string(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// File name before the session prefix was added.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }
}
