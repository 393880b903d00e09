use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use bnd_core::naming::VIDEO_METADATA_FILE;
use bnd_core::{CameraFileName, SubjectId};
use bnd_validate::video::is_video_file;
use bnd_validate::validate_session_path;
use bnd_validate::walk::{self, WalkMode};

use super::{Rename, move_path};
use crate::error::TransferError;

/// Gather the session's videos into `<session>_cameras/` and name them
/// `<session>_camera_<n>.avi`.
///
/// All videos must share one folder. Videos at the session root are moved
/// (with `metadata.csv`) into a new canonical folder; any other folder is
/// renamed to the canonical name. The camera index of a raw file is the last
/// `_`-separated token of its stem. Every target is resolved and checked
/// before the first move.
///
/// # Errors
///
/// Fails if videos are spread over several folders, the canonical folder
/// already exists next to another video folder, a target name is taken or
/// claimed twice, or a raw file name carries no camera index. Nothing is
/// moved in any of these cases.
pub fn rename_raw_videos(
    session_path: &Path,
    subject: &SubjectId,
) -> Result<Vec<Rename>, TransferError> {
    let session = validate_session_path(session_path, subject)?;
    let videos: Vec<PathBuf> = walk::files_below(session_path, WalkMode::Visible)?
        .into_iter()
        .filter(|p| is_video_file(p))
        .collect();
    if videos.is_empty() {
        tracing::debug!(session = %session, "no videos to rename");
        return Ok(Vec::new());
    }

    let folders: BTreeSet<PathBuf> = videos
        .iter()
        .filter_map(|p| p.parent().map(Path::to_path_buf))
        .collect();
    if folders.len() > 1 {
        return Err(TransferError::AmbiguousVideoFolders {
            folders: folders.into_iter().collect(),
        });
    }
    let Some(current) = folders.into_iter().next() else {
        return Ok(Vec::new());
    };

    let canonical = session_path.join(session.video_folder_name());
    let from_root = current == session_path;
    if !from_root && current != canonical && canonical.exists() {
        return Err(TransferError::AlreadyExists {
            from: current,
            to: canonical,
        });
    }

    // (file name in `current`, file name in `canonical`)
    let mut cameras: Vec<(String, String)> = Vec::new();
    for video in &videos {
        let name = walk::file_name(video);
        let target = if CameraFileName::parse(&name, &session).is_ok() {
            name.clone()
        } else {
            let camera = CameraFileName::index_from_raw(&name)
                .ok_or_else(|| TransferError::BadCameraFile(video.clone()))?;
            CameraFileName::canonical(&session, camera)
        };
        cameras.push((name, target));
    }

    // Where a target would sit right now, before anything moves.
    let occupied = |target: &str| {
        if from_root {
            canonical.join(target)
        } else {
            current.join(target)
        }
    };
    let mut claimed = BTreeSet::new();
    for (name, target) in &cameras {
        let taken = !claimed.insert(target.clone())
            || ((from_root || name != target) && occupied(target).exists());
        if taken {
            return Err(TransferError::AlreadyExists {
                from: current.join(name),
                to: canonical.join(target),
            });
        }
    }
    let metadata = session_path.join(VIDEO_METADATA_FILE);
    let move_metadata = from_root && metadata.is_file();
    if move_metadata && canonical.join(VIDEO_METADATA_FILE).exists() {
        return Err(TransferError::AlreadyExists {
            from: metadata,
            to: canonical.join(VIDEO_METADATA_FILE),
        });
    }

    let mut moves = Vec::new();
    if from_root {
        fs::create_dir_all(&canonical)?;
        for (name, target) in &cameras {
            moves.push(move_path(&current.join(name), &canonical.join(target))?);
        }
        if move_metadata {
            moves.push(move_path(&metadata, &canonical.join(VIDEO_METADATA_FILE))?);
        }
        return Ok(moves);
    }

    if current != canonical {
        moves.push(move_path(&current, &canonical)?);
    }
    for (name, target) in cameras.iter().filter(|(name, target)| name != target) {
        moves.push(move_path(&canonical.join(name), &canonical.join(target))?);
    }
    Ok(moves)
}
