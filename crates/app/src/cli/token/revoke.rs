use clap::Args;
use portal_app::{auth::PgAuthService, database, domain::dealers::records::DealerUuid};
use uuid::Uuid;

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct RevokeTargets {
    /// Token UUIDs to revoke
    #[arg(long = "token-uuid")]
    token_uuids: Vec<Uuid>,

    /// Revoke every active token of this dealer
    #[arg(long)]
    dealer_uuid: Option<Uuid>,
}

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(flatten)]
    targets: RevokeTargets,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool);

    let token_uuids = match args.targets.dealer_uuid {
        Some(dealer_uuid) => service
            .list_api_tokens(DealerUuid::from_uuid(dealer_uuid))
            .await
            .map_err(|error| format!("failed to list tokens: {error}"))?
            .into_iter()
            .filter(|token| token.revoked_at.is_none())
            .map(|token| token.uuid)
            .collect(),
        None => args.targets.token_uuids,
    };

    if token_uuids.is_empty() {
        println!("nothing to revoke");

        return Ok(());
    }

    for token_uuid in token_uuids {
        let revoked = service
            .revoke_api_token(token_uuid)
            .await
            .map_err(|error| format!("failed to revoke token {token_uuid}: {error}"))?;

        println!(
            "{token_uuid}  {}",
            if revoked { "revoked" } else { "already inactive" }
        );
    }

    Ok(())
}
