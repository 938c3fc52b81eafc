//! Rebate Claim Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    rebates::{errors::into_status_error, responses::ClaimsResponse},
    state::State,
};

/// Rebate Claim Index Handler
///
/// Lists the dealer's claims.
#[endpoint(
    tags("rebates"),
    summary = "List Rebate Claims",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ClaimsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let claims = state
        .app
        .rebates
        .list_claims(dealer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ClaimsResponse {
        claims: claims.into_iter().map(Into::into).collect(),
    }))
}
