use clap::{Parser, Subcommand};

mod db;
mod dealer;
mod token;

#[derive(Debug, Parser)]
#[command(name = "portal-app", about = "Dealer portal operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage dealer accounts
    Dealer(dealer::DealerCommand),

    /// Manage API tokens
    Token(token::TokenCommand),

    /// Database maintenance
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Dealer(command) => dealer::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
