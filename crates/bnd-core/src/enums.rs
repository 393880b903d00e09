//! Processing levels and data modalities.
//!
//! Both enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and are closed: anything else is rejected at the boundary where a string is
//! turned into one of them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ProcessingLevel
// ---------------------------------------------------------------------------

/// Processing level of a session tree: `<root>/<level>/<subject>/<session>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingLevel {
    /// Data as acquired.
    Raw,
    /// Derived artifacts.
    Processed,
}

impl ProcessingLevel {
    pub const ALL: [Self; 2] = [Self::Raw, Self::Processed];

    /// Name of the level directory directly below a storage root.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Processed => "processed",
        }
    }

    /// Parse the directory name of a level.
    #[must_use]
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == name)
    }
}

impl fmt::Display for ProcessingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Modality
// ---------------------------------------------------------------------------

/// A category of session data.
///
/// The derived `Ord` is the canonical processing order: behavior, ephys,
/// video, extra files. Validation results and transfers follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Behavior,
    Ephys,
    Video,
    ExtraFiles,
}

impl Modality {
    pub const ALL: [Self; 4] = [Self::Behavior, Self::Ephys, Self::Video, Self::ExtraFiles];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Behavior => "behavior",
            Self::Ephys => "ephys",
            Self::Video => "video",
            Self::ExtraFiles => "extra_files",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_dir_names_roundtrip() {
        for level in ProcessingLevel::ALL {
            assert_eq!(ProcessingLevel::from_dir_name(level.as_str()), Some(level));
        }
        assert_eq!(ProcessingLevel::from_dir_name("invalid_proc_level"), None);
    }

    #[test]
    fn level_serializes_snake_case() {
        let json = serde_json::to_string(&ProcessingLevel::Processed).unwrap();
        assert_eq!(json, "\"processed\"");
    }

    #[test]
    fn modality_order_is_canonical() {
        let mut shuffled = vec![
            Modality::ExtraFiles,
            Modality::Video,
            Modality::Behavior,
            Modality::Ephys,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Modality::ALL.to_vec());
    }

    #[test]
    fn modality_display_matches_serde() {
        for modality in Modality::ALL {
            let json = serde_json::to_string(&modality).unwrap();
            assert_eq!(json, format!("\"{modality}\""));
        }
    }
}
