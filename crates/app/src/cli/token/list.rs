use clap::Args;
use portal_app::{auth::PgAuthService, database, domain::dealers::records::DealerUuid};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Dealer whose tokens should be listed
    #[arg(long)]
    dealer_uuid: Uuid,
}

fn or_placeholder(value: Option<impl ToString>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |value| value.to_string())
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let tokens = PgAuthService::new(pool)
        .list_api_tokens(DealerUuid::from_uuid(args.dealer_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens for dealer {}", args.dealer_uuid);

        return Ok(());
    }

    for token in tokens {
        println!(
            "{}  admin={}  created={}  last_used={}  expires={}  revoked={}",
            token.uuid,
            token.is_admin,
            token.created_at,
            or_placeholder(token.last_used_at, "never"),
            or_placeholder(token.expires_at, "none"),
            or_placeholder(token.revoked_at, "active"),
        );
    }

    Ok(())
}
