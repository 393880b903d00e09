use clap::Subcommand;

use crate::cli::subcommands::{
    ConfigCommands, DownloadCommands, RenameCommands, SessionsCommands, UploadCommands,
    ValidateCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check session folders against the naming convention.
    Validate {
        #[command(subcommand)]
        action: ValidateCommands,
    },
    /// Copy local sessions to the remote root.
    Upload {
        #[command(subcommand)]
        action: UploadCommands,
    },
    /// Copy remote sessions to the local root.
    Download {
        #[command(subcommand)]
        action: DownloadCommands,
    },
    /// Bring files to their canonical names.
    Rename {
        #[command(subcommand)]
        action: RenameCommands,
    },
    /// List sessions.
    Sessions {
        #[command(subcommand)]
        action: SessionsCommands,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}
