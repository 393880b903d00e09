use clap::Subcommand;

/// Renaming commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RenameCommands {
    /// Move and rename raw camera files to the canonical layout.
    Videos { path: String, subject: String },
    /// Prefix extra files with the session name.
    Extra { path: String },
}
