use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct DealerCommand {
    #[command(subcommand)]
    command: DealerSubcommand,
}

#[derive(Debug, Subcommand)]
enum DealerSubcommand {
    /// Register a dealer account
    Create(create::CreateDealerArgs),
}

pub(crate) async fn run(command: DealerCommand) -> Result<(), String> {
    match command.command {
        DealerSubcommand::Create(args) => create::run(args).await,
    }
}
