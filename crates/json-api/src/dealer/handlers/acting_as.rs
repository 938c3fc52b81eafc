//! Acting-As Handlers
//!
//! Lets an administrator work on one dealer's data. The choice lives in a
//! cookie the auth middleware reads on every request.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use salvo::{
    http::header::SET_COOKIE,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use portal_app::domain::dealers::records::DealerUuid;

use crate::{dealer::errors::into_status_error, extensions::*, state::State};

/// Cookie naming the dealer an administrator acts as.
pub(crate) const ACTING_AS_COOKIE: &str = "acting_dealer_uuid";

/// How long an acting-as choice lasts.
const ACTING_AS_LIFETIME: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActingAsRequest {
    /// Dealer to act as
    #[serde(default)]
    pub dealer_uuid: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActingAsResponse {
    pub dealer_uuid: Uuid,
    pub store_name: Option<String>,

    /// When the cookie lapses
    pub expires_at: String,
}

fn acting_cookie(value: &str, max_age_secs: i64) -> String {
    format!("{ACTING_AS_COOKIE}={value}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Lax")
}

/// Set Acting-As Handler
///
/// Validates the dealer, then sets the acting-as cookie for 24 hours.
#[endpoint(
    tags("admin"),
    summary = "Act As Dealer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Acting as the dealer"),
        (status_code = StatusCode::BAD_REQUEST, description = "dealer_uuid missing"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown dealer"),
    ),
)]
pub(crate) async fn set(
    json: JsonBody<ActingAsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ActingAsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_403()?;

    let dealer = json
        .into_inner()
        .dealer_uuid
        .map(DealerUuid::from_uuid)
        .ok_or_else(|| StatusError::bad_request().brief("dealer_uuid is required"))?;

    let record = state
        .app
        .dealers
        .find_dealer(dealer)
        .await
        .map_err(into_status_error)?
        .ok_or_else(|| StatusError::not_found().brief("Dealer not found"))?;

    let expires_at = Timestamp::now()
        .checked_add(ACTING_AS_LIFETIME)
        .or_500("failed to compute acting-as expiry")?;

    res.add_header(
        SET_COOKIE,
        acting_cookie(&dealer.to_string(), ACTING_AS_LIFETIME.as_secs()),
        false,
    )
    .or_500("failed to set acting-as cookie")?;

    info!(admin_dealer_uuid = %admin.dealer, acting_dealer_uuid = %dealer, "acting as dealer");

    Ok(Json(ActingAsResponse {
        dealer_uuid: dealer.into(),
        store_name: record.store_name,
        expires_at: expires_at.to_string(),
    }))
}

/// Reset Acting-As Handler
///
/// Clears the acting-as cookie.
#[endpoint(
    tags("admin"),
    summary = "Stop Acting As Dealer",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::NO_CONTENT, description = "Acting-as cleared")),
)]
pub(crate) async fn reset(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let admin = depot.admin_or_403()?;

    res.add_header(SET_COOKIE, acting_cookie("", 0), false)
        .or_500("failed to clear acting-as cookie")?
        .status_code(StatusCode::NO_CONTENT);

    info!(admin_dealer_uuid = %admin.dealer, "stopped acting as dealer");

    Ok(())
}
