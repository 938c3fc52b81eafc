//! Get Dealer Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_app::domain::dealers::records::DealerRecord;

use crate::{dealer::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DealerResponse {
    /// Dealer UUID
    pub uuid: Uuid,

    /// Customer number the dealer signs in with
    pub login_nr: Option<String>,

    /// Store display name
    pub store_name: Option<String>,

    /// Contact address
    pub email: Option<String>,

    /// When the dealer was registered
    pub created_at: String,
}

impl From<DealerRecord> for DealerResponse {
    fn from(dealer: DealerRecord) -> Self {
        Self {
            uuid: dealer.uuid.into(),
            login_nr: dealer.login_nr,
            store_name: dealer.store_name,
            email: dealer.email,
            created_at: dealer.created_at.to_string(),
        }
    }
}

/// Get Dealer Handler
///
/// Returns the dealer the bearer token belongs to.
#[endpoint(
    tags("dealer"),
    summary = "Current Dealer",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DealerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let record = state
        .app
        .dealers
        .get_dealer(dealer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}
