use clap::Subcommand;

use super::ModalityFlags;

/// Validation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ValidateCommands {
    /// Validate one session folder.
    Session {
        /// Path of the session folder.
        path: String,
        /// Subject the session belongs to.
        subject: String,
        #[command(flatten)]
        modalities: ModalityFlags,
    },
    /// Validate the most recent session of a subject.
    Last {
        subject: String,
        #[arg(long)]
        remote: bool,
        #[command(flatten)]
        modalities: ModalityFlags,
    },
    /// Validate every session of a subject.
    Subject {
        subject: String,
        /// Processing level to look in.
        #[arg(long, default_value = "raw")]
        level: String,
        /// Look in the remote root instead of the local one.
        #[arg(long)]
        remote: bool,
        #[command(flatten)]
        modalities: ModalityFlags,
    },
    /// Validate every session recorded today.
    Today {
        #[arg(long)]
        remote: bool,
        /// Day to check instead of today (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        modalities: ModalityFlags,
    },
}
