//! Raw camera recordings.

use std::path::{Path, PathBuf};

use bnd_core::naming::{VIDEO_EXTENSION, VIDEO_METADATA_FILE};
use bnd_core::{
    CameraFileName, Diagnostic, DiagnosticKind, Modality, SessionName, SubjectId, Validated,
};

use crate::error::ValidationError;
use crate::session::validate_session_path;
use crate::walk::{self, WalkMode};

/// True for `.avi` files.
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == VIDEO_EXTENSION)
}

/// Validate the video folder of a session.
///
/// Returns the `<session>_cameras` folder, or an empty set with a
/// [`DiagnosticKind::MissingVideoFolder`] diagnostic when it does not exist.
///
/// # Errors
///
/// Fails if the folder holds no videos, a video is not named
/// `<session>_camera_<n>.avi`, `metadata.csv` is missing, anything else is in
/// the folder, or a video or metadata file lives outside it.
pub fn validate_video(
    session_path: &Path,
    subject: &SubjectId,
) -> Result<Validated<Vec<PathBuf>>, ValidationError> {
    let session = validate_session_path(session_path, subject)?;
    let folder = session_path.join(session.video_folder_name());

    let mut found = Vec::new();
    let mut diagnostics = Vec::new();
    if folder.is_dir() {
        validate_video_folder(&folder, &session)?;
        found.push(folder.clone());
    } else {
        diagnostics.push(Diagnostic::new(
            Modality::Video,
            DiagnosticKind::MissingVideoFolder,
            session_path,
            format!("No correctly named video folder found in {}", session_path.display()),
        ));
    }

    for file in walk::files_below(session_path, WalkMode::Visible)? {
        let kind = if is_video_file(&file) {
            format!(".{VIDEO_EXTENSION}")
        } else if walk::file_name(&file) == VIDEO_METADATA_FILE {
            VIDEO_METADATA_FILE.to_string()
        } else {
            continue;
        };
        if file.parent() != Some(folder.as_path()) {
            return Err(ValidationError::MisplacedVideoFile {
                kind,
                path: file,
                expected: folder,
            });
        }
    }

    Ok(Validated::with_diagnostics(found, diagnostics))
}

fn validate_video_folder(folder: &Path, session: &SessionName) -> Result<(), ValidationError> {
    let children = walk::list_dir(folder, WalkMode::Visible)?;
    let (videos, others): (Vec<PathBuf>, Vec<PathBuf>) = children
        .into_iter()
        .partition(|p| p.is_file() && is_video_file(p));

    if videos.is_empty() {
        return Err(ValidationError::NoVideoFiles(folder.to_path_buf()));
    }
    for video in &videos {
        CameraFileName::parse(&walk::file_name(video), session)?;
    }

    let mut unexpected: Vec<String> = others.iter().map(|p| walk::file_name(p)).collect();
    let Some(metadata) = unexpected.iter().position(|n| n == VIDEO_METADATA_FILE) else {
        return Err(ValidationError::MissingVideoMetadata(folder.to_path_buf()));
    };
    unexpected.remove(metadata);
    if !unexpected.is_empty() {
        return Err(ValidationError::UnexpectedVideoFolderFiles {
            folder: folder.to_path_buf(),
            files: unexpected,
        });
    }

    tracing::debug!(folder = %folder.display(), videos = videos.len(), "video folder valid");
    Ok(())
}
