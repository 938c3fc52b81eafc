//! Cashback Claim Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cashback::{errors::into_status_error, responses::CashbackClaimsResponse},
    extensions::*,
    state::State,
};

/// Cashback Claim Index Handler
///
/// Lists the dealer's cashback claims, newest first.
#[endpoint(
    tags("cashback"),
    summary = "List Cashback Claims",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CashbackClaimsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let claims = state
        .app
        .cashback
        .list_claims(dealer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CashbackClaimsResponse {
        claims: claims.into_iter().map(Into::into).collect(),
    }))
}
