use clap::Args;
use portal_app::{
    database::{self, Db},
    domain::dealers::{DealersService, PgDealersService, data::NewDealer, records::DealerUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateDealerArgs {
    /// Customer number the dealer signs in with
    #[arg(long)]
    login_nr: String,

    /// Store display name
    #[arg(long)]
    store_name: Option<String>,

    /// Contact email for notifications
    #[arg(long)]
    email: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional dealer UUID; generated when omitted
    #[arg(long)]
    dealer_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateDealerArgs) -> Result<(), String> {
    if args.login_nr.trim().is_empty() {
        return Err("login-nr cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgDealersService::new(Db::new(pool));

    let dealer = service
        .create_dealer(NewDealer {
            uuid: args
                .dealer_uuid
                .map_or_else(DealerUuid::new, DealerUuid::from_uuid),
            login_nr: Some(args.login_nr),
            store_name: args.store_name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create dealer: {error}"))?;

    println!("dealer_uuid: {}", dealer.uuid);
    println!("login_nr: {}", dealer.login_nr.unwrap_or_default());
    println!("store_name: {}", dealer.store_name.unwrap_or_default());

    Ok(())
}
