//! Submission Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use portal_app::domain::submissions::records::SubmissionType;

use crate::{
    extensions::*,
    state::State,
    submissions::{errors::into_status_error, responses::SubmissionResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmissionsResponse {
    /// Newest first
    pub submissions: Vec<SubmissionResponse>,
}

/// Submission Index Handler
///
/// Lists the dealer's submissions, optionally narrowed by `kind`.
#[endpoint(
    tags("submissions"),
    summary = "List Submissions",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    kind: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SubmissionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let kind = kind
        .into_inner()
        .map(|kind| kind.parse::<SubmissionType>())
        .transpose()
        .or_400("kind must be order, sale, project or support")?;

    let submissions = state
        .app
        .submissions
        .list_submissions(dealer, kind)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SubmissionsResponse {
        submissions: submissions.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use portal_app::domain::submissions::{MockSubmissionsService, records::SubmissionUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        submissions::handlers::tests::make_submission,
        test_helpers::{TEST_DEALER_UUID, TestServices, dealer_service},
    };

    use super::*;

    fn make_service(submissions: MockSubmissionsService) -> Service {
        dealer_service(
            TestServices {
                submissions,
                ..TestServices::default()
            },
            Router::with_path("submissions").get(handler),
        )
    }

    #[tokio::test]
    async fn kind_filter_is_forwarded() -> TestResult {
        let uuid = SubmissionUuid::new();

        let mut submissions = MockSubmissionsService::new();

        submissions
            .expect_list_submissions()
            .once()
            .withf(|dealer, kind| *dealer == TEST_DEALER_UUID && *kind == Some(SubmissionType::Sale))
            .return_once(move |dealer, _| {
                Ok(vec![make_submission(uuid, dealer, SubmissionType::Sale)])
            });

        let mut res = TestClient::get("http://example.com/submissions?kind=sale")
            .send(&make_service(submissions))
            .await;

        let body: SubmissionsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.submissions.len(), 1);
        assert_eq!(
            body.submissions.first().map(|submission| submission.kind.as_str()),
            Some("sale")
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_kind_returns_400() -> TestResult {
        let mut submissions = MockSubmissionsService::new();

        submissions.expect_list_submissions().never();

        let res = TestClient::get("http://example.com/submissions?kind=invoice")
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
