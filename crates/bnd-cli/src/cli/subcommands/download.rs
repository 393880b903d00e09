use clap::Subcommand;

use super::ModalityFlags;

/// Download commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DownloadCommands {
    /// Download one remote session by name.
    Session {
        /// Session name, e.g. M017_2024_03_12_18_45.
        session: String,
        #[command(flatten)]
        modalities: ModalityFlags,
    },
}
