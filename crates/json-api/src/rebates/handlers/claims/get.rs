//! Get Rebate Claim Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    rebates::{errors::into_status_error, responses::ClaimResponse},
    state::State,
};

/// Get Rebate Claim Handler
#[endpoint(
    tags("rebates"),
    summary = "Get Rebate Claim",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    claim: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ClaimResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let claim = state
        .app
        .rebates
        .get_claim(dealer, claim.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(claim.into()))
}

#[cfg(test)]
mod tests {
    use portal_app::domain::rebates::{
        MockRebateClaimsService, RebateClaimsServiceError, records::RebateClaimUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        rebates::handlers::tests::make_claim,
        test_helpers::{TestServices, dealer_service},
    };

    use super::*;

    fn make_service(rebates: MockRebateClaimsService) -> Service {
        dealer_service(
            TestServices {
                rebates,
                ..TestServices::default()
            },
            Router::with_path("rebates/claims/{claim}").get(handler),
        )
    }

    #[tokio::test]
    async fn returns_claim_with_product_snapshot() -> TestResult {
        let uuid = RebateClaimUuid::new();

        let mut rebates = MockRebateClaimsService::new();

        rebates
            .expect_get_claim()
            .once()
            .withf(move |_, claim| *claim == uuid)
            .return_once(move |_, _| Ok(make_claim(uuid)));

        let mut res = TestClient::get(format!("http://example.com/rebates/claims/{uuid}"))
            .send(&make_service(rebates))
            .await;

        let body: ClaimResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.products.first().and_then(|product| product.category.as_deref()),
            Some("TV")
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_claim_returns_404() -> TestResult {
        let mut rebates = MockRebateClaimsService::new();

        rebates
            .expect_get_claim()
            .once()
            .return_once(|_, _| Err(RebateClaimsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/rebates/claims/{}",
            RebateClaimUuid::new()
        ))
        .send(&make_service(rebates))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
