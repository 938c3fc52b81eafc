//! Get Cashback Claim Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    cashback::{errors::into_status_error, responses::CashbackClaimResponse},
    extensions::*,
    state::State,
};

/// Get Cashback Claim Handler
#[endpoint(
    tags("cashback"),
    summary = "Get Cashback Claim",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    claim: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CashbackClaimResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.dealer_uuid_or_401()?;

    let claim = state
        .app
        .cashback
        .get_claim(dealer, claim.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(claim.into()))
}

#[cfg(test)]
mod tests {
    use portal_app::domain::cashback::{
        CashbackClaimsServiceError, MockCashbackClaimsService, records::CashbackClaimUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        cashback::handlers::tests::make_claim,
        test_helpers::{TestServices, dealer_service},
    };

    use super::*;

    fn make_service(cashback: MockCashbackClaimsService) -> Service {
        dealer_service(
            TestServices {
                cashback,
                ..TestServices::default()
            },
            Router::with_path("cashback/claims/{claim}").get(handler),
        )
    }

    #[tokio::test]
    async fn returns_claim_with_soundbar_fields() -> TestResult {
        let uuid = CashbackClaimUuid::new();

        let mut cashback = MockCashbackClaimsService::new();

        cashback
            .expect_get_claim()
            .once()
            .withf(move |_, claim| *claim == uuid)
            .return_once(move |_, _| Ok(make_claim(uuid)));

        let mut res = TestClient::get(format!("http://example.com/cashback/claims/{uuid}"))
            .send(&make_service(cashback))
            .await;

        let body: CashbackClaimResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.soundbar_serial_number.as_deref(), Some("SB998877"));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_claim_returns_404() -> TestResult {
        let mut cashback = MockCashbackClaimsService::new();

        cashback
            .expect_get_claim()
            .once()
            .return_once(|_, _| Err(CashbackClaimsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/cashback/claims/{}",
            CashbackClaimUuid::new()
        ))
        .send(&make_service(cashback))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
