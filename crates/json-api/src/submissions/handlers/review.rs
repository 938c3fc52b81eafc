//! Review Submission Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    review::ReviewRequest,
    state::State,
    submissions::{errors::into_status_error, responses::SubmissionResponse},
};

/// Review Submission Handler
///
/// Confirms or rejects a dealer submission.
#[endpoint(
    tags("admin"),
    summary = "Review Submission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::NOT_FOUND, description = "Submission not found"),
    ),
)]
pub(crate) async fn handler(
    submission: PathParam<Uuid>,
    json: JsonBody<ReviewRequest>,
    depot: &mut Depot,
) -> Result<Json<SubmissionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_403()?;
    let status = json.into_inner().status()?;

    let record = state
        .app
        .submissions
        .update_status(submission.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    info!(admin_dealer_uuid = %admin.dealer, submission_uuid = %record.uuid, %status, "submission reviewed");

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use portal_app::domain::{
        review::ReviewStatus,
        submissions::{
            MockSubmissionsService,
            records::{SubmissionType, SubmissionUuid},
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        submissions::handlers::tests::make_submission,
        test_helpers::{TEST_DEALER_UUID, TestServices, admin_service, dealer_service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/submissions/{submission}/status").put(handler)
    }

    #[tokio::test]
    async fn admin_can_approve() -> TestResult {
        let uuid = SubmissionUuid::new();

        let mut submissions = MockSubmissionsService::new();

        submissions
            .expect_update_status()
            .once()
            .withf(move |submission, status| *submission == uuid && *status == ReviewStatus::Approved)
            .return_once(move |_, status| {
                let mut record = make_submission(uuid, TEST_DEALER_UUID, SubmissionType::Order);
                record.status = status;

                Ok(record)
            });

        let services = TestServices {
            submissions,
            ..TestServices::default()
        };

        let mut res = TestClient::put(format!("http://example.com/admin/submissions/{uuid}/status"))
            .json(&json!({ "status": "approved" }))
            .send(&admin_service(services, route()))
            .await;

        let body: SubmissionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "approved");

        Ok(())
    }

    #[tokio::test]
    async fn dealer_token_returns_403() -> TestResult {
        let mut submissions = MockSubmissionsService::new();

        submissions.expect_update_status().never();

        let services = TestServices {
            submissions,
            ..TestServices::default()
        };

        let res = TestClient::put(format!(
            "http://example.com/admin/submissions/{}/status",
            SubmissionUuid::new()
        ))
        .json(&json!({ "status": "approved" }))
        .send(&dealer_service(services, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_returns_400() -> TestResult {
        let mut submissions = MockSubmissionsService::new();

        submissions.expect_update_status().never();

        let services = TestServices {
            submissions,
            ..TestServices::default()
        };

        let res = TestClient::put(format!(
            "http://example.com/admin/submissions/{}/status",
            SubmissionUuid::new()
        ))
        .json(&json!({ "status": "shipped" }))
        .send(&admin_service(services, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
