use clap::Subcommand;

/// Configuration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Check that both storage roots are usable.
    Check,
}
