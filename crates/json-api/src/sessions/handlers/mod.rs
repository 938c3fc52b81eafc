//! Session Handlers
//!
//! Sessions belong to the signed-in caller, also while an administrator acts
//! as a dealer.

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    sessions::{
        errors::into_status_error,
        responses::{ActivityResponse, SessionResponse},
    },
    state::State,
};

/// Start Session Handler
///
/// Opens a session with a fresh idle timer.
#[endpoint(
    tags("sessions"),
    summary = "Start Session",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::CREATED, description = "Session started")),
)]
pub(crate) async fn start(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.principal_or_401()?.dealer;

    let session = state.app.sessions.start_session(dealer).await;

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}

/// Get Session Handler
///
/// Reports time remaining and whether the expiry warning is showing.
#[endpoint(
    tags("sessions"),
    summary = "Get Session",
    security(("bearer_auth" = []))
)]
pub(crate) async fn get(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.principal_or_401()?.dealer;

    let session = state
        .app
        .sessions
        .get_session(dealer, session.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}

/// Renew Session Handler
///
/// Explicit "stay signed in": restarts the full duration and clears the warning.
#[endpoint(
    tags("sessions"),
    summary = "Renew Session",
    security(("bearer_auth" = []))
)]
pub(crate) async fn renew(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.principal_or_401()?.dealer;

    let session = state
        .app
        .sessions
        .renew_session(dealer, session.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}

/// Session Activity Handler
///
/// Reports user activity; renews unless the last renewal was within the throttle.
#[endpoint(
    tags("sessions"),
    summary = "Record Session Activity",
    security(("bearer_auth" = []))
)]
pub(crate) async fn activity(
    session: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ActivityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.principal_or_401()?.dealer;

    let recorded = state
        .app
        .sessions
        .record_activity(dealer, session.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(recorded.into()))
}

/// End Session Handler
///
/// Signs out and stops the session timer.
#[endpoint(
    tags("sessions"),
    summary = "End Session",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::NO_CONTENT, description = "Signed out")),
)]
pub(crate) async fn end(
    session: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let dealer = depot.principal_or_401()?.dealer;

    state
        .app
        .sessions
        .end_session(dealer, session.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jiff::Timestamp;
    use portal_app::domain::sessions::{
        MockSessionsService, SessionActivity, SessionSnapshot, SessionUuid, SessionsServiceError,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_DEALER_UUID, TestServices, dealer_service};

    use super::*;

    fn snapshot(uuid: SessionUuid, remaining: Duration, warning: bool) -> SessionSnapshot {
        SessionSnapshot {
            uuid,
            dealer: TEST_DEALER_UUID,
            started_at: Timestamp::UNIX_EPOCH,
            expires_at: Timestamp::UNIX_EPOCH,
            remaining,
            warning,
        }
    }

    fn make_service(sessions: MockSessionsService) -> Service {
        dealer_service(
            TestServices {
                sessions,
                ..TestServices::default()
            },
            Router::with_path("sessions").post(start).push(
                Router::with_path("{session}")
                    .get(get)
                    .delete(end)
                    .push(Router::with_path("renew").post(renew))
                    .push(Router::with_path("activity").post(activity)),
            ),
        )
    }

    #[tokio::test]
    async fn start_returns_201_with_full_duration() -> TestResult {
        let uuid = SessionUuid::new();

        let mut sessions = MockSessionsService::new();

        sessions
            .expect_start_session()
            .once()
            .withf(|dealer| *dealer == TEST_DEALER_UUID)
            .return_once(move |_| snapshot(uuid, Duration::from_secs(1_200), false));

        let mut res = TestClient::post("http://example.com/sessions")
            .send(&make_service(sessions))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.remaining_seconds, 1_200);
        assert!(!body.warning, "fresh session shows no warning");

        Ok(())
    }

    #[tokio::test]
    async fn get_surfaces_warning() -> TestResult {
        let uuid = SessionUuid::new();

        let mut sessions = MockSessionsService::new();

        sessions
            .expect_get_session()
            .once()
            .withf(move |dealer, session| *dealer == TEST_DEALER_UUID && *session == uuid)
            .return_once(move |_, _| Ok(snapshot(uuid, Duration::from_secs(90), true)));

        let mut res = TestClient::get(format!("http://example.com/sessions/{uuid}"))
            .send(&make_service(sessions))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.warning, "warning should be showing");
        assert_eq!(body.remaining_seconds, 90);

        Ok(())
    }

    #[tokio::test]
    async fn renew_after_expiry_returns_401() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_renew_session()
            .once()
            .return_once(|_, _| Err(SessionsServiceError::Expired));

        let res = TestClient::post(format!(
            "http://example.com/sessions/{}/renew",
            SessionUuid::new()
        ))
        .send(&make_service(sessions))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn throttled_activity_reports_not_renewed() -> TestResult {
        let uuid = SessionUuid::new();

        let mut sessions = MockSessionsService::new();

        sessions.expect_record_activity().once().return_once(move |_, _| {
            Ok(SessionActivity {
                renewed: false,
                session: snapshot(uuid, Duration::from_secs(1_190), false),
            })
        });

        let mut res = TestClient::post(format!("http://example.com/sessions/{uuid}/activity"))
            .send(&make_service(sessions))
            .await;

        let body: ActivityResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.renewed, "activity inside the throttle must not renew");

        Ok(())
    }

    #[tokio::test]
    async fn end_returns_204() -> TestResult {
        let uuid = SessionUuid::new();

        let mut sessions = MockSessionsService::new();

        sessions
            .expect_end_session()
            .once()
            .withf(move |dealer, session| *dealer == TEST_DEALER_UUID && *session == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/sessions/{uuid}"))
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn ending_unknown_session_returns_404() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_end_session()
            .once()
            .return_once(|_, _| Err(SessionsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/sessions/{}", SessionUuid::new()))
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
