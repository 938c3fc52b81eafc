//! Session response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_app::domain::sessions::{SessionActivity, SessionSnapshot};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub uuid: Uuid,
    pub started_at: String,
    pub expires_at: String,

    /// Whole seconds until forced sign-out
    pub remaining_seconds: u64,

    /// The expiry warning is showing
    pub warning: bool,
}

impl From<SessionSnapshot> for SessionResponse {
    fn from(session: SessionSnapshot) -> Self {
        Self {
            uuid: session.uuid.into(),
            started_at: session.started_at.to_string(),
            expires_at: session.expires_at.to_string(),
            remaining_seconds: session.remaining.as_secs(),
            warning: session.warning,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActivityResponse {
    /// False when the activity fell inside the renewal throttle
    pub renewed: bool,

    pub session: SessionResponse,
}

impl From<SessionActivity> for ActivityResponse {
    fn from(activity: SessionActivity) -> Self {
        Self {
            renewed: activity.renewed,
            session: activity.session.into(),
        }
    }
}
