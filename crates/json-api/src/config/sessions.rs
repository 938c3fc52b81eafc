//! Sessions Config

use std::time::Duration;

use clap::Args;

use portal_app::domain::sessions::SessionPolicy;

/// Idle expiry settings for dealer sessions.
#[derive(Debug, Args)]
pub struct SessionsConfig {
    /// Idle time before a session is signed out.
    #[arg(long, env = "SESSION_DURATION_SECONDS", default_value_t = 1_200_u64)]
    pub session_duration_seconds: u64,

    /// How long before expiry the warning is raised.
    #[arg(long, env = "SESSION_WARNING_LEAD_SECONDS", default_value_t = 120_u64)]
    pub session_warning_lead_seconds: u64,

    /// Minimum gap between activity-triggered renewals.
    #[arg(long, env = "SESSION_ACTIVITY_THROTTLE_SECONDS", default_value_t = 30_u64)]
    pub session_activity_throttle_seconds: u64,
}

impl SessionsConfig {
    /// Session policy for the sessions service.
    #[must_use]
    pub fn policy(&self) -> SessionPolicy {
        SessionPolicy {
            duration: Duration::from_secs(self.session_duration_seconds),
            warning_lead: Duration::from_secs(self.session_warning_lead_seconds),
            activity_throttle: Duration::from_secs(self.session_activity_throttle_seconds),
            ..SessionPolicy::default()
        }
    }
}
