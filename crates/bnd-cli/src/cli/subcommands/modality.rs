use bnd_core::Modality;
use bnd_validate::ModalitySelection;
use clap::Args;

/// Modality switches shared by validate, upload and download.
///
/// Behavior, ephys and video are on unless ignored; extra files are off
/// unless requested.
#[derive(Clone, Debug, Default, Args)]
pub struct ModalityFlags {
    /// Skip behavioral data.
    #[arg(long)]
    pub ignore_behavior: bool,
    /// Skip ephys recordings.
    #[arg(long)]
    pub ignore_ephys: bool,
    /// Skip video data.
    #[arg(long)]
    pub ignore_videos: bool,
    /// Include extra files.
    #[arg(long)]
    pub check_extra: bool,
}

impl ModalityFlags {
    #[must_use]
    pub fn selection(&self) -> ModalitySelection {
        let mut selection = ModalitySelection::raw_data();
        selection.set(Modality::Behavior, !self.ignore_behavior);
        selection.set(Modality::Ephys, !self.ignore_ephys);
        selection.set(Modality::Video, !self.ignore_videos);
        selection.set(Modality::ExtraFiles, self.check_extra);
        selection
    }
}

/// Opt-outs for the renames run before an upload.
#[derive(Clone, Debug, Default, Args)]
pub struct RenameFlags {
    /// Upload videos under their current names.
    #[arg(long)]
    pub no_rename_videos: bool,
    /// Upload extra files under their current names.
    #[arg(long)]
    pub no_rename_extra: bool,
}
