use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Validate { action } => commands::validate::handle(&action, ctx, flags),
        Commands::Upload { action } => commands::upload::handle(&action, ctx, flags),
        Commands::Download { action } => commands::download::handle(&action, ctx, flags),
        Commands::Rename { action } => commands::rename::handle(&action, ctx, flags),
        Commands::Sessions { action } => commands::sessions::handle(&action, ctx, flags),
        Commands::Config { action } => commands::config::handle(&action, ctx, flags),
    }
}
