use clap::Subcommand;

use super::{ModalityFlags, RenameFlags};

/// Upload commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UploadCommands {
    /// Upload one local session.
    Session {
        /// Path of the session folder below the local root.
        path: String,
        subject: String,
        #[command(flatten)]
        modalities: ModalityFlags,
        #[command(flatten)]
        renames: RenameFlags,
    },
    /// Upload the most recent local session of a subject.
    Last {
        subject: String,
        #[command(flatten)]
        modalities: ModalityFlags,
        #[command(flatten)]
        renames: RenameFlags,
    },
    /// Upload every local session of a subject.
    Subject {
        subject: String,
        #[command(flatten)]
        modalities: ModalityFlags,
        #[command(flatten)]
        renames: RenameFlags,
    },
}
