//! Bearer token middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};

use portal_app::{auth::AuthServiceError, domain::dealers::records::DealerUuid};

use crate::{dealer::acting_as::ACTING_AS_COOKIE, extensions::*, state::State};

/// Resolve the bearer token to a [`Principal`](portal_app::auth::Principal) for downstream handlers.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    match state.app.auth.authenticate_bearer(token).await {
        Ok(principal) => {
            debug!(dealer_uuid = %principal.dealer, admin = principal.is_admin(), "authenticated");

            if principal.is_admin()
                && let Some(acting) = acting_dealer(req)
            {
                debug!(acting_dealer_uuid = %acting, "admin acting as dealer");

                depot.insert_acting_dealer(acting);
            }

            depot.insert_principal(principal);
        }
        Err(AuthServiceError::NotFound | AuthServiceError::Token(_)) => {
            res.render(StatusError::unauthorized().brief("Invalid API token"));
            ctrl.skip_rest();

            return;
        }
        Err(error @ (AuthServiceError::Sql(_) | AuthServiceError::UnknownDealer)) => {
            error!("failed to validate api token: {error}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

fn acting_dealer(req: &Request) -> Option<DealerUuid> {
    req.cookie(ACTING_AS_COOKIE)?.value().parse().ok()
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use portal_app::{
        auth::{MockAuthService, Principal},
        domain::dealers::records::DealerUuid,
    };
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test_helpers::{TestServices, state_with};

    use super::*;

    #[salvo::handler]
    async fn echo_principal(depot: &mut Depot, res: &mut Response) {
        let body = depot.principal_or_401().map_or_else(
            |_missing| "missing".to_string(),
            |principal| format!("{}:{}", principal.dealer, principal.is_admin()),
        );

        res.render(body);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = state_with(TestServices {
            auth,
            ..TestServices::default()
        });

        Service::new(
            Router::new()
                .hoop(inject(state))
                .hoop(handler)
                .push(Router::new().get(echo_principal)),
        )
    }

    #[tokio::test]
    async fn missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn basic_scheme_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "pt_v1_abc")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer pt_v1_abc", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_returns_500() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Sql(sqlx_pool_closed())));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer pt_v1_abc", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn valid_token_injects_principal() -> TestResult {
        let dealer = DealerUuid::from_uuid(Uuid::nil());

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "pt_v1_abc")
            .return_once(move |_| Ok(Principal::admin(dealer)));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer pt_v1_abc", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, format!("{dealer}:true"));

        Ok(())
    }

    #[salvo::handler]
    async fn echo_dealer(depot: &mut Depot, res: &mut Response) {
        let body = depot
            .dealer_uuid_or_401()
            .map_or_else(|_missing| "missing".to_string(), |dealer| dealer.to_string());

        res.render(body);
    }

    fn make_dealer_echo(auth: MockAuthService) -> Service {
        let state = state_with(TestServices {
            auth,
            ..TestServices::default()
        });

        Service::new(
            Router::new()
                .hoop(inject(state))
                .hoop(handler)
                .push(Router::new().get(echo_dealer)),
        )
    }

    #[tokio::test]
    async fn admin_acting_as_cookie_switches_dealer() -> TestResult {
        let acting = DealerUuid::new();

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(Principal::admin(DealerUuid::from_uuid(Uuid::nil()))));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer pt_v1_abc", true)
            .add_header("cookie", format!("{ACTING_AS_COOKIE}={acting}"), true)
            .send(&make_dealer_echo(auth))
            .await;

        assert_eq!(res.take_string().await?, acting.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn dealer_acting_as_cookie_is_ignored() -> TestResult {
        let own = DealerUuid::from_uuid(Uuid::nil());

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(move |_| Ok(Principal::dealer(own)));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer pt_v1_abc", true)
            .add_header("cookie", format!("{ACTING_AS_COOKIE}={}", DealerUuid::new()), true)
            .send(&make_dealer_echo(auth))
            .await;

        assert_eq!(res.take_string().await?, own.to_string());

        Ok(())
    }

    fn sqlx_pool_closed() -> sqlx::Error {
        sqlx::Error::PoolClosed
    }
}
