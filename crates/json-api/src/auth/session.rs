//! Live session middleware.
//!
//! Runs after bearer authentication on dealer-facing routes. Each request
//! counts as activity and renews the session within the throttle.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::debug;

use portal_app::domain::sessions::{SessionUuid, SessionsServiceError};

use crate::{extensions::*, state::State};

/// Header carrying the session opened with `POST /sessions`.
pub(crate) const SESSION_HEADER: &str = "x-session-id";

/// Reject the request unless it names a live session of the caller.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(session) = session_id(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid X-Session-Id header"));
        ctrl.skip_rest();

        return;
    };

    let (state, principal) = match (
        depot.obtain_or_500::<Arc<State>>(),
        depot.principal_or_401(),
    ) {
        (Ok(state), Ok(principal)) => (Arc::clone(state), principal),
        (Err(error), _) | (_, Err(error)) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    match state
        .app
        .sessions
        .record_activity(principal.dealer, session)
        .await
    {
        Ok(activity) => {
            debug!(session_uuid = %session, renewed = activity.renewed, "session activity");
        }
        Err(SessionsServiceError::Expired) => {
            res.render(StatusError::unauthorized().brief("Session expired, please sign in again"));
            ctrl.skip_rest();

            return;
        }
        Err(SessionsServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Session not found"));
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

fn session_id(req: &Request) -> Option<SessionUuid> {
    req.headers()
        .get(SESSION_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<SessionUuid>()
        .ok()
}
