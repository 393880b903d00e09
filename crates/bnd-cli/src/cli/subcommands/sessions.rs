use clap::Subcommand;

/// Session listing commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionsCommands {
    /// List the session folders of a subject.
    List {
        subject: String,
        #[arg(long)]
        remote: bool,
    },
    /// Show the most recent session of a subject.
    Last {
        subject: String,
        #[arg(long)]
        remote: bool,
    },
    /// List every session recorded today.
    Today {
        #[arg(long)]
        remote: bool,
        /// Day to list instead of today (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
    },
}
