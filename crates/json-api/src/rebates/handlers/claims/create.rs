//! Create Rebate Claim Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability,
    rebates::{errors::into_status_error, requests::CreateClaimRequest, responses::ClaimResponse},
    state::State,
};

/// Create Rebate Claim Handler
///
/// Validates the bundle, then files a pending claim.
#[endpoint(
    tags("rebates"),
    summary = "File Rebate Claim",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Claim filed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid bundle or missing invoice"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateClaimRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ClaimResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let claim = state
        .app
        .rebates
        .submit_claim(dealer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    observability::record_rebate_claim(claim.tier.level());

    res.add_header(LOCATION, format!("/rebates/claims/{}", claim.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(claim.into()))
}

#[cfg(test)]
mod tests {
    use portal_app::domain::rebates::{
        InvalidCompositionError, MockRebateClaimsService, RebateClaimsServiceError,
        records::RebateClaimUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        rebates::handlers::tests::make_claim,
        test_helpers::{TEST_DEALER_UUID, TestServices, dealer_service},
    };

    use super::*;

    fn make_service(rebates: MockRebateClaimsService) -> Service {
        dealer_service(
            TestServices {
                rebates,
                ..TestServices::default()
            },
            Router::with_path("rebates/claims").post(handler),
        )
    }

    #[tokio::test]
    async fn files_claim_and_returns_201() -> TestResult {
        let uuid = RebateClaimUuid::new();

        let mut rebates = MockRebateClaimsService::new();

        rebates
            .expect_submit_claim()
            .once()
            .withf(|dealer, claim| {
                *dealer == TEST_DEALER_UUID
                    && claim.invoice_path == "invoices/2024/0815.pdf"
                    && claim.items.len() == 2
                    && claim.comment.is_none()
            })
            .return_once(move |_, _| Ok(make_claim(uuid)));

        let mut res = TestClient::post("http://example.com/rebates/claims")
            .json(&json!({
                "invoice_path": "invoices/2024/0815.pdf",
                "items": [
                    { "category": "TV", "base_amount": 100, "double_amount": 150 },
                    { "category": "Soundbar" }
                ]
            }))
            .send(&make_service(rebates))
            .await;

        let body: ClaimResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/rebates/claims/{uuid}").as_str()));
        assert_eq!(body.tier, 2);
        assert_eq!(body.status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn missing_invoice_returns_400() -> TestResult {
        let mut rebates = MockRebateClaimsService::new();

        rebates
            .expect_submit_claim()
            .once()
            .return_once(|_, _| Err(RebateClaimsServiceError::MissingInvoice));

        let res = TestClient::post("http://example.com/rebates/claims")
            .json(&json!({ "items": [{ "category": "TV" }] }))
            .send(&make_service(rebates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn second_soundbar_returns_400() -> TestResult {
        let mut rebates = MockRebateClaimsService::new();

        rebates.expect_submit_claim().once().return_once(|_, _| {
            Err(InvalidCompositionError::TooManySoundbars(2).into())
        });

        let res = TestClient::post("http://example.com/rebates/claims")
            .json(&json!({
                "invoice_path": "invoices/2024/0815.pdf",
                "items": [{ "category": "TV" }, { "category": "Soundbar" }, { "category": "soundbar" }]
            }))
            .send(&make_service(rebates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
