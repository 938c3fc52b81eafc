use clap::Args;
use jiff::Timestamp;
use portal_app::{
    auth::{PgAuthService, Role},
    database,
    domain::dealers::records::DealerUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Dealer UUID that should own the token
    #[arg(long)]
    dealer_uuid: Uuid,

    /// Grant back-office review rights
    #[arg(long)]
    admin: bool,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    if args
        .expires_at
        .is_some_and(|expires_at| expires_at <= Timestamp::now())
    {
        return Err("expires-at must be in the future".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let role = if args.admin { Role::Admin } else { Role::Dealer };

    let issued = PgAuthService::new(pool)
        .issue_api_token(DealerUuid::from_uuid(args.dealer_uuid), role, args.expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("dealer_uuid: {}", issued.metadata.dealer_uuid);
    println!("admin: {}", issued.metadata.is_admin);

    if let Some(expires_at) = issued.metadata.expires_at {
        println!("expires_at: {expires_at}");
    }

    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
