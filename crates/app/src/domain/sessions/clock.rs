//! Session expiry clock.
//!
//! A pure state machine driven by explicit instants so it can be stepped in
//! tests; [`SessionTimer`](super::timer::SessionTimer) feeds it real time.

use std::time::Duration;

use tokio::time::Instant;

/// Timing rules for dealer sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Lifetime granted by each renewal.
    pub duration: Duration,

    /// How long before expiry the warning fires.
    pub warning_lead: Duration,

    /// Minimum gap between activity-triggered renewals.
    pub activity_throttle: Duration,

    /// Polling period of the timer.
    pub tick: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(20 * 60),
            warning_lead: Duration::from_secs(2 * 60),
            activity_throttle: Duration::from_secs(30),
            tick: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active { expires_at: Instant },
    WarningShown { expires_at: Instant },
    Expired,
}

/// Emitted by [`SessionClock::tick`], each at most once per lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Warning { remaining: Duration },
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOutcome {
    Renewed,

    /// Ignored; the previous activity renewal is too recent.
    Throttled,

    /// The session already ended.
    Expired,
}

/// The session has expired and can no longer be renewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session has expired")]
pub struct ClockExpired;

#[derive(Debug, Clone)]
pub struct SessionClock {
    policy: SessionPolicy,
    state: SessionState,
    last_activity_renewal: Option<Instant>,
}

impl SessionClock {
    #[must_use]
    pub fn start(policy: SessionPolicy, now: Instant) -> Self {
        Self {
            policy,
            state: SessionState::Active {
                expires_at: now + policy.duration,
            },
            last_activity_renewal: None,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> SessionPolicy {
        self.policy
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn expires_at(&self) -> Option<Instant> {
        match self.state {
            SessionState::Active { expires_at } | SessionState::WarningShown { expires_at } => {
                Some(expires_at)
            }
            SessionState::Expired => None,
        }
    }

    #[must_use]
    pub const fn is_warning_shown(&self) -> bool {
        matches!(self.state, SessionState::WarningShown { .. })
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self.state, SessionState::Expired)
    }

    /// Time left before expiry; zero once expired.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at()
            .map_or(Duration::ZERO, |expires_at| expires_at.saturating_duration_since(now))
    }

    /// Push expiry to `now + duration` and clear the warning.
    pub fn renew(&mut self, now: Instant) -> Result<Instant, ClockExpired> {
        if self.is_expired() {
            return Err(ClockExpired);
        }

        let expires_at = now + self.policy.duration;

        self.state = SessionState::Active { expires_at };

        Ok(expires_at)
    }

    /// Renew on user activity, at most once per throttle window.
    pub fn record_activity(&mut self, now: Instant) -> ActivityOutcome {
        if self.is_expired() {
            return ActivityOutcome::Expired;
        }

        let throttled = self.last_activity_renewal.is_some_and(|last| {
            now.saturating_duration_since(last) < self.policy.activity_throttle
        });

        if throttled {
            return ActivityOutcome::Throttled;
        }

        self.last_activity_renewal = Some(now);

        match self.renew(now) {
            Ok(_) => ActivityOutcome::Renewed,
            Err(ClockExpired) => ActivityOutcome::Expired,
        }
    }

    /// Advance to `now`, returning the event this step crosses, if any.
    pub fn tick(&mut self, now: Instant) -> Option<SessionEvent> {
        let expires_at = self.expires_at()?;
        let remaining = expires_at.saturating_duration_since(now);

        if remaining.is_zero() {
            self.state = SessionState::Expired;

            return Some(SessionEvent::Expired);
        }

        match self.state {
            SessionState::Active { expires_at } if remaining <= self.policy.warning_lead => {
                self.state = SessionState::WarningShown { expires_at };

                Some(SessionEvent::Warning { remaining })
            }
            SessionState::Active { .. }
            | SessionState::WarningShown { .. }
            | SessionState::Expired => None,
        }
    }
}
