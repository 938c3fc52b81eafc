//! Create Cashback Claim Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    cashback::{
        errors::into_status_error, requests::CreateCashbackClaimRequest,
        responses::CashbackClaimResponse,
    },
    extensions::*,
    observability,
    state::State,
};

/// Create Cashback Claim Handler
///
/// Files the claim under a new pending `cashback` submission.
#[endpoint(
    tags("cashback"),
    summary = "File Cashback Claim",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Claim filed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing type, amount or serial number"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCashbackClaimRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CashbackClaimResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let claim = json.into_inner().into_claim()?;

    let claim = state
        .app
        .cashback
        .submit_claim(dealer, claim)
        .await
        .map_err(into_status_error)?;

    observability::record_cashback_claim(claim.cashback_type.as_str());

    res.add_header(LOCATION, format!("/cashback/claims/{}", claim.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(claim.into()))
}
