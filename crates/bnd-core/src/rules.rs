//! Session rules: the configurable part of the directory convention.
//!
//! A `SessionRules` value is passed explicitly into every validator, renamer
//! and transfer call. `bnd-config` embeds it as the `[rules]` section.

use serde::{Deserialize, Serialize};

use crate::naming::{ExtraFileName, SessionName};

fn default_whitelisted_files_in_root() -> Vec<String> {
    [
        "comment.txt",
        "traj_plan.txt",
        "trajectory.txt",
        "channel_map.txt",
        "bci.log",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_extensions() -> Vec<String> {
    vec![".txt".to_string(), ".log".to_string()]
}

fn default_ignored_subject_level_dirs() -> Vec<String> {
    vec!["treadmill-calibration".to_string()]
}

const fn default_device_count() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionRules {
    /// File names allowed at the session root, bare or prefixed with `<session>_`.
    #[serde(default = "default_whitelisted_files_in_root")]
    pub whitelisted_files_in_root: Vec<String>,

    /// Extensions (with leading dot) allowed anywhere below the session root.
    /// Such files are renamed to carry the session prefix and uploaded.
    #[serde(default = "default_extensions")]
    pub extensions_to_rename_and_upload: Vec<String>,

    /// Directories next to subject folders that are not subjects.
    #[serde(default = "default_ignored_subject_level_dirs")]
    pub ignored_subject_level_dirs: Vec<String>,

    /// Number of recorded external devices; one event log per device.
    #[serde(default = "default_device_count")]
    pub device_count: usize,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            whitelisted_files_in_root: default_whitelisted_files_in_root(),
            extensions_to_rename_and_upload: default_extensions(),
            ignored_subject_level_dirs: default_ignored_subject_level_dirs(),
            device_count: default_device_count(),
        }
    }
}

impl SessionRules {
    /// True if `name` at the root of `session` is a whitelisted file, either
    /// as configured or already carrying the session prefix.
    #[must_use]
    pub fn is_whitelisted_root_file(&self, name: &str, session: &SessionName) -> bool {
        self.whitelisted_files_in_root
            .iter()
            .any(|allowed| name == allowed || name == ExtraFileName::canonical(session, allowed))
    }

    /// True if `name` has one of the extensions allowed below the root.
    #[must_use]
    pub fn has_allowed_extension(&self, name: &str) -> bool {
        self.extensions_to_rename_and_upload
            .iter()
            .any(|extension| name.ends_with(extension.as_str()) && name.len() > extension.len())
    }

    #[must_use]
    pub fn is_ignored_subject_dir(&self, name: &str) -> bool {
        self.ignored_subject_level_dirs.iter().any(|dir| dir == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionName {
        SessionName::parse_inferred("M011_2023_04_04_16_00").unwrap()
    }

    #[test]
    fn defaults_are_correct() {
        let rules = SessionRules::default();
        assert_eq!(rules.whitelisted_files_in_root.len(), 5);
        assert_eq!(rules.extensions_to_rename_and_upload, vec![".txt", ".log"]);
        assert_eq!(rules.device_count, 2);
        assert!(rules.is_ignored_subject_dir("treadmill-calibration"));
    }

    #[test]
    fn whitelist_matches_bare_and_prefixed_names() {
        let rules = SessionRules::default();
        let session = session();
        assert!(rules.is_whitelisted_root_file("comment.txt", &session));
        assert!(rules.is_whitelisted_root_file("M011_2023_04_04_16_00_comment.txt", &session));
        assert!(!rules.is_whitelisted_root_file("notes.txt", &session));
        assert!(!rules.is_whitelisted_root_file("M011_2023_04_04_16_00_notes.txt", &session));
    }

    #[test]
    fn allowed_extensions() {
        let rules = SessionRules::default();
        assert!(rules.has_allowed_extension("channel_map.txt"));
        assert!(rules.has_allowed_extension("bci.log"));
        assert!(!rules.has_allowed_extension(".txt"));
        assert!(!rules.has_allowed_extension("x_t0.imec0.ap.meta"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let rules: SessionRules = serde_json::from_str(r#"{"device_count": 4}"#).unwrap();
        assert_eq!(rules.device_count, 4);
        assert_eq!(rules.extensions_to_rename_and_upload, vec![".txt", ".log"]);
    }
}
