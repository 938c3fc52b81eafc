//! Create Submission Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability,
    state::State,
    submissions::{
        errors::into_status_error, requests::CreateSubmissionRequest,
        responses::SubmittedGroupResponse,
    },
};

/// Create Submission Handler
///
/// Writes one submission per fulfilling distributor. A failure part-way leaves
/// the groups before it written.
#[endpoint(
    tags("submissions"),
    summary = "Submit Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Submissions written"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or malformed fields"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "No dealer for this account"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Write failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSubmissionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Vec<SubmittedGroupResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;
    let submission = json.into_inner().into_submission()?;
    let kind = submission.kind.submission_type();

    let groups = state
        .app
        .submissions
        .submit(dealer, submission)
        .await
        .map_err(into_status_error)?;

    observability::record_submission_groups(kind.as_str(), groups.len());
    res.status_code(StatusCode::CREATED);

    Ok(Json(groups.into_iter().map(Into::into).collect()))
}
