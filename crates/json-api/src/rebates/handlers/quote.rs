//! Rebate Quote Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    rebates::{errors::into_status_error, requests::QuoteRequest, responses::QuoteResponse},
    state::State,
};

/// Rebate Quote Handler
///
/// Previews the tier and amount a cart would earn. Nothing is stored.
#[endpoint(
    tags("rebates"),
    summary = "Quote Rebate",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart qualifies"),
        (status_code = StatusCode::BAD_REQUEST, description = "Not a valid rebate bundle"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<QuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.dealer_uuid_or_401()?;

    let quote = state
        .app
        .rebates
        .quote(json.into_inner().into_lines())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}

#[cfg(test)]
mod tests {
    use portal_app::domain::rebates::{
        InvalidCompositionError, MockRebateClaimsService, RebateClaimsServiceError, RebateQuote,
        RebateTier, classify_role,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TestServices, dealer_service};

    use super::*;

    fn make_service(rebates: MockRebateClaimsService) -> Service {
        dealer_service(
            TestServices {
                rebates,
                ..TestServices::default()
            },
            Router::with_path("rebates/quote").post(handler),
        )
    }

    #[tokio::test]
    async fn returns_tier_and_amount() -> TestResult {
        let mut rebates = MockRebateClaimsService::new();

        rebates
            .expect_quote()
            .once()
            .withf(|items| {
                items.len() == 2
                    && items
                        .iter()
                        .filter_map(|line| classify_role(line.category.as_deref()))
                        .count()
                        == 2
            })
            .return_once(|_| {
                Ok(RebateQuote {
                    tier: RebateTier::Double,
                    amount: 150.0,
                })
            });

        let mut res = TestClient::post("http://example.com/rebates/quote")
            .json(&json!({
                "items": [
                    { "category": "TV", "base_amount": "100", "double_amount": 150, "triple_amount": 200 },
                    { "category": "Soundbar" }
                ]
            }))
            .send(&make_service(rebates))
            .await;

        let body: QuoteResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.tier, 2);
        assert!((body.amount - 150.0).abs() < f64::EPSILON, "amount was {}", body.amount);

        Ok(())
    }

    #[tokio::test]
    async fn two_tvs_return_400() -> TestResult {
        let mut rebates = MockRebateClaimsService::new();

        rebates.expect_quote().once().return_once(|_| {
            Err(RebateClaimsServiceError::InvalidComposition(
                InvalidCompositionError::TvCount(2),
            ))
        });

        let res = TestClient::post("http://example.com/rebates/quote")
            .json(&json!({ "items": [{ "category": "TV" }, { "category": "tv" }] }))
            .send(&make_service(rebates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
