//! Review Rebate Claim Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    rebates::{errors::into_status_error, responses::ClaimResponse},
    review::ReviewRequest,
    state::State,
};

/// Review Rebate Claim Handler
///
/// Approves or rejects a claim.
#[endpoint(
    tags("admin"),
    summary = "Review Rebate Claim",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::NOT_FOUND, description = "Claim not found"),
    ),
)]
pub(crate) async fn handler(
    claim: PathParam<Uuid>,
    json: JsonBody<ReviewRequest>,
    depot: &mut Depot,
) -> Result<Json<ClaimResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_403()?;
    let status = json.into_inner().status()?;

    let claim = state
        .app
        .rebates
        .review_claim(claim.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    info!(admin_dealer_uuid = %admin.dealer, claim_uuid = %claim.uuid, %status, "rebate claim reviewed");

    Ok(Json(claim.into()))
}

#[cfg(test)]
mod tests {
    use portal_app::domain::{
        rebates::{MockRebateClaimsService, RebateClaimsServiceError, records::RebateClaimUuid},
        review::ReviewStatus,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        rebates::handlers::tests::make_claim,
        test_helpers::{TestServices, admin_service, dealer_service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/rebates/claims/{claim}/status").put(handler)
    }

    #[tokio::test]
    async fn admin_can_reject() -> TestResult {
        let uuid = RebateClaimUuid::new();

        let mut rebates = MockRebateClaimsService::new();

        rebates
            .expect_review_claim()
            .once()
            .withf(move |claim, status| *claim == uuid && *status == ReviewStatus::Rejected)
            .return_once(move |_, status| {
                let mut claim = make_claim(uuid);
                claim.status = status;

                Ok(claim)
            });

        let services = TestServices {
            rebates,
            ..TestServices::default()
        };

        let mut res = TestClient::put(format!("http://example.com/admin/rebates/claims/{uuid}/status"))
            .json(&json!({ "status": "rejected" }))
            .send(&admin_service(services, route()))
            .await;

        let body: ClaimResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "rejected");

        Ok(())
    }

    #[tokio::test]
    async fn dealer_token_returns_403() -> TestResult {
        let mut rebates = MockRebateClaimsService::new();

        rebates.expect_review_claim().never();

        let services = TestServices {
            rebates,
            ..TestServices::default()
        };

        let res = TestClient::put(format!(
            "http://example.com/admin/rebates/claims/{}/status",
            RebateClaimUuid::new()
        ))
        .json(&json!({ "status": "approved" }))
        .send(&dealer_service(services, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_claim_returns_404() -> TestResult {
        let mut rebates = MockRebateClaimsService::new();

        rebates
            .expect_review_claim()
            .once()
            .return_once(|_, _| Err(RebateClaimsServiceError::NotFound));

        let services = TestServices {
            rebates,
            ..TestServices::default()
        };

        let res = TestClient::put(format!(
            "http://example.com/admin/rebates/claims/{}/status",
            RebateClaimUuid::new()
        ))
        .json(&json!({ "status": "approved" }))
        .send(&admin_service(services, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
