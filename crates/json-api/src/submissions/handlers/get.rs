//! Get Submission Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    submissions::{errors::into_status_error, responses::SubmissionDetailResponse},
};

/// Get Submission Handler
///
/// Returns a submission with its lines and, for project requests, the project.
#[endpoint(
    tags("submissions"),
    summary = "Get Submission",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    submission: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SubmissionDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let detail = state
        .app
        .submissions
        .get_submission(dealer, submission.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}
