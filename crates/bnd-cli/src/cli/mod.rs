use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `bnd` binary.
#[derive(Debug, Parser)]
#[command(
    name = "bnd",
    version,
    about = "bnd - validate and synchronize lab session data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use bnd_core::Modality;
    use clap::{CommandFactory, Parser};

    use super::subcommands::{SessionsCommands, UploadCommands, ValidateCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["bnd", "--format", "table", "--verbose", "config", "show"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Config { .. }));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["bnd", "sessions", "list", "M017", "--format", "raw", "-q"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Sessions {
                action: SessionsCommands::List { remote: false, .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["bnd", "--format", "xml", "config", "show"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn ignore_flags_shape_the_selection() {
        let cli = Cli::try_parse_from([
            "bnd",
            "validate",
            "session",
            "/data/raw/M017/M017_2024_03_12_18_45",
            "M017",
            "--ignore-ephys",
            "--check-extra",
        ])
        .expect("cli should parse");

        let Commands::Validate {
            action: ValidateCommands::Session { modalities, .. },
        } = cli.command
        else {
            panic!("expected validate session");
        };
        let selection = modalities.selection();
        assert!(selection.contains(Modality::Behavior));
        assert!(!selection.contains(Modality::Ephys));
        assert!(selection.contains(Modality::Video));
        assert!(selection.contains(Modality::ExtraFiles));
    }

    #[test]
    fn upload_rename_flags_are_opt_out() {
        let cli = Cli::try_parse_from([
            "bnd",
            "upload",
            "last",
            "M017",
            "--no-rename-videos",
        ])
        .expect("cli should parse");

        let Commands::Upload {
            action: UploadCommands::Last { renames, .. },
        } = cli.command
        else {
            panic!("expected upload last");
        };
        assert!(renames.no_rename_videos);
        assert!(!renames.no_rename_extra);
    }

    #[test]
    fn validate_subject_defaults_to_raw_level() {
        let cli = Cli::try_parse_from(["bnd", "validate", "subject", "M017", "--remote"])
            .expect("cli should parse");

        let Commands::Validate {
            action: ValidateCommands::Subject { level, remote, .. },
        } = cli.command
        else {
            panic!("expected validate subject");
        };
        assert_eq!(level, "raw");
        assert!(remote);
    }

    #[test]
    fn validate_last_takes_subject_and_remote() {
        let cli = Cli::try_parse_from(["bnd", "validate", "last", "M017", "--remote"])
            .expect("cli should parse");

        let Commands::Validate {
            action: ValidateCommands::Last {
                subject, remote, ..
            },
        } = cli.command
        else {
            panic!("expected validate last");
        };
        assert_eq!(subject, "M017");
        assert!(remote);
    }
}
