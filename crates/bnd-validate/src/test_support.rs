//! Synthetic session trees for tests.
//!
//! Builds `<storage root>/raw/<subject>/<session>/...` layouts on disk. Every
//! file's contents default to its own relative path, so two files never
//! compare equal by accident.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bnd_core::naming::{TASK_FOLDER, VIDEO_METADATA_FILE};
use bnd_core::{CameraFileName, ProcessingLevel, SessionName, SubjectId};

use crate::walk::{self, WalkMode};

/// Session used by the end-to-end scenarios.
pub const SESSION: &str = "M017_2024_03_12_18_45";

/// Builder for one session folder below a storage root.
#[derive(Debug, Clone)]
pub struct SessionTree {
    root: PathBuf,
    session: SessionName,
}

impl SessionTree {
    /// Create `<root>/raw/<subject>/<session>/`.
    ///
    /// # Panics
    ///
    /// Panics on an invalid session name or a failed mkdir.
    pub fn new(root: &Path, session: &str) -> Self {
        let session = SessionName::parse_inferred(session).expect("valid session name");
        let tree = Self {
            root: root.to_path_buf(),
            session,
        };
        fs::create_dir_all(tree.path()).expect("create session dir");
        tree
    }

    /// A session with every modality present and valid: task log, two
    /// devices' event logs, a task script, one recording with two probes and
    /// two cameras with metadata.
    pub fn complete(root: &Path, session: &str) -> Self {
        let tree = Self::new(root, session);
        tree.with_behavior().with_recording(0, &[0, 1]).with_videos(2);
        tree
    }

    #[must_use]
    pub fn storage_root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn subject(&self) -> &SubjectId {
        self.session.subject()
    }

    #[must_use]
    pub const fn session(&self) -> &SessionName {
        &self.session
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.session.as_str()
    }

    /// `<root>/raw/<subject>`.
    #[must_use]
    pub fn subject_path(&self) -> PathBuf {
        self.root
            .join(ProcessingLevel::Raw.as_str())
            .join(self.session.subject().as_str())
    }

    /// `<root>/raw/<subject>/<session>`.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.subject_path().join(self.session.as_str())
    }

    /// Create a file whose contents are its relative path.
    pub fn file(&self, relative: &str) -> &Self {
        self.file_with(relative, relative.as_bytes())
    }

    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn file_with(&self, relative: &str, contents: &[u8]) -> &Self {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write file");
        self
    }

    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.path().join(relative)).expect("create dir");
        self
    }

    /// Task log, two devices' X/Y event logs and a task script.
    pub fn with_behavior(&self) -> &Self {
        let s = self.name();
        self.file(&format!("{s}.txt"))
            .file(&format!("{s}_MotSen0-X.pca"))
            .file(&format!("{s}_MotSen0-Y.pca"))
            .file(&format!("{TASK_FOLDER}/task.py"))
    }

    /// Recording `<session>_g<gate>` with one complete probe folder per index.
    pub fn with_recording(&self, gate: u8, probes: &[u8]) -> &Self {
        let recording = format!("{}_g{gate}", self.name());
        self.dir(&recording);
        for probe in probes {
            let folder = format!("{recording}/{recording}_imec{probe}");
            for ending in ["lf.meta", "lf.bin", "ap.meta", "ap.bin"] {
                self.file(&format!("{folder}/{recording}_t0.imec{probe}.{ending}"));
            }
        }
        self
    }

    /// `<session>_cameras/` with `cameras` canonical videos and `metadata.csv`.
    pub fn with_videos(&self, cameras: u32) -> &Self {
        let folder = self.session.video_folder_name();
        for camera in 0..cameras {
            let name = CameraFileName::canonical(&self.session, camera);
            self.file(&format!("{folder}/{name}"));
        }
        self.file(&format!("{folder}/{VIDEO_METADATA_FILE}"))
    }
}

/// Relative path to contents of every file below `dir`.
///
/// # Panics
///
/// Panics if the tree cannot be walked or read.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    walk::files_below(dir, WalkMode::All)
        .expect("walk tree")
        .into_iter()
        .map(|path| {
            let contents = fs::read(&path).expect("read file");
            let relative = path.strip_prefix(dir).expect("below dir").to_path_buf();
            (relative, contents)
        })
        .collect()
}

/// Relative paths of every file below `dir`, as strings.
pub fn relative_files(dir: &Path) -> Vec<String> {
    snapshot(dir)
        .into_keys()
        .map(|path| path.to_string_lossy().into_owned())
        .collect()
}
