//! In-process session registry.

use std::{
    sync::{Arc, Mutex, PoisonError, Weak},
    time::Duration,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::{
    sync::{
        broadcast,
        mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
    time::Instant,
};
use tracing::{info, trace, warn};

use crate::{
    domain::{
        dealers::records::DealerUuid,
        sessions::{
            clock::{ActivityOutcome, SessionClock, SessionEvent, SessionPolicy},
            errors::SessionsServiceError,
            timer::{SessionNotice, SessionTimer},
        },
    },
    uuids::TypedUuid,
};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionSnapshot>;

/// Point-in-time view of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub uuid: SessionUuid,
    pub dealer: DealerUuid,
    pub started_at: Timestamp,
    pub expires_at: Timestamp,
    pub remaining: Duration,

    /// The expiry warning has fired and not been cleared by a renewal.
    pub warning: bool,
}

/// Result of reporting user activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionActivity {
    pub renewed: bool,
    pub session: SessionSnapshot,
}

#[derive(Debug)]
struct SessionEntry {
    dealer: DealerUuid,
    started_at: Timestamp,
    clock: Arc<Mutex<SessionClock>>,
    _timer: SessionTimer,
}

impl SessionEntry {
    fn snapshot(&self, uuid: SessionUuid) -> SessionSnapshot {
        let clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        let remaining = clock.remaining(Instant::now());
        let warning = clock.is_warning_shown()
            || (!remaining.is_zero() && remaining <= clock.policy().warning_lead);

        SessionSnapshot {
            uuid,
            dealer: self.dealer,
            started_at: self.started_at,
            expires_at: Timestamp::now()
                .checked_add(remaining)
                .unwrap_or(Timestamp::MAX),
            remaining,
            warning,
        }
    }

    fn with_clock<T>(&self, f: impl FnOnce(&mut SessionClock) -> T) -> T {
        f(&mut self.clock.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type Registry = Mutex<FxHashMap<SessionUuid, SessionEntry>>;

/// Notices retained for slow subscribers before they start lagging.
const NOTICE_BACKLOG: usize = 64;

/// Sessions held in memory, each polled by its own [`SessionTimer`].
///
/// Expired sessions are removed by a background reaper, which signs the
/// dealer out. Must be created inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct InMemorySessionsService {
    policy: SessionPolicy,
    sessions: Arc<Registry>,
    notices: UnboundedSender<SessionNotice<SessionUuid>>,
    handled: broadcast::Sender<SessionNotice<SessionUuid>>,
}

impl InMemorySessionsService {
    #[must_use]
    pub fn new(policy: SessionPolicy) -> Self {
        let sessions = Arc::new(Mutex::new(FxHashMap::default()));
        let (notices, receiver) = mpsc::unbounded_channel();
        let (handled, _) = broadcast::channel(NOTICE_BACKLOG);

        tokio::spawn(reap(Arc::downgrade(&sessions), receiver, handled.clone()));

        Self {
            policy,
            sessions,
            notices,
            handled,
        }
    }

    /// Notices the reaper has acted on, in the order it handled them.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionNotice<SessionUuid>> {
        self.handled.subscribe()
    }

    #[must_use]
    pub const fn policy(&self) -> SessionPolicy {
        self.policy
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, FxHashMap<SessionUuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the dealer's live session.
    ///
    /// Only a clock already past its deadline is advanced here; warnings stay
    /// with the session's timer so the reaper sees every one of them.
    fn with_session<T>(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
        f: impl FnOnce(&SessionEntry) -> T,
    ) -> Result<T, SessionsServiceError> {
        let mut sessions = self.registry();

        let entry = sessions
            .get(&session)
            .filter(|entry| entry.dealer == dealer)
            .ok_or(SessionsServiceError::NotFound)?;

        let now = Instant::now();

        let expiry = entry.with_clock(|clock| {
            clock
                .remaining(now)
                .is_zero()
                .then(|| clock.tick(now))
        });

        if let Some(event) = expiry {
            sessions.remove(&session);

            if let Some(event) = event
                && self.notices.send(SessionNotice { session, event }).is_err()
            {
                trace!(session_uuid = %session, "session reaper has stopped");
            }

            info!(session_uuid = %session, dealer_uuid = %dealer, "session expired, signed out");

            return Err(SessionsServiceError::Expired);
        }

        Ok(f(entry))
    }
}

/// Consume timer notices until every sender is gone.
async fn reap(
    sessions: Weak<Registry>,
    mut notices: UnboundedReceiver<SessionNotice<SessionUuid>>,
    handled: broadcast::Sender<SessionNotice<SessionUuid>>,
) {
    while let Some(notice) = notices.recv().await {
        let Some(sessions) = sessions.upgrade() else {
            break;
        };

        let SessionNotice { session, event } = notice;

        match event {
            SessionEvent::Warning { remaining } => {
                warn!(
                    session_uuid = %session,
                    remaining_secs = remaining.as_secs(),
                    "session about to expire"
                );
            }
            SessionEvent::Expired => {
                let removed = sessions
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&session);

                if let Some(entry) = removed {
                    info!(
                        session_uuid = %session,
                        dealer_uuid = %entry.dealer,
                        "session expired, signed out"
                    );
                }
            }
        }

        if handled.send(notice).is_err() {
            trace!(session_uuid = %session, "no session notice subscribers");
        }
    }
}

#[async_trait]
impl SessionsService for InMemorySessionsService {
    async fn start_session(&self, dealer: DealerUuid) -> SessionSnapshot {
        let uuid = SessionUuid::new();
        let clock = Arc::new(Mutex::new(SessionClock::start(self.policy, Instant::now())));

        let entry = SessionEntry {
            dealer,
            started_at: Timestamp::now(),
            clock: Arc::clone(&clock),
            _timer: SessionTimer::spawn(uuid, clock, self.policy.tick, self.notices.clone()),
        };

        let snapshot = entry.snapshot(uuid);

        self.registry().insert(uuid, entry);

        info!(session_uuid = %uuid, dealer_uuid = %dealer, "session started");

        snapshot
    }

    async fn get_session(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
    ) -> Result<SessionSnapshot, SessionsServiceError> {
        self.with_session(dealer, session, |entry| entry.snapshot(session))
    }

    async fn renew_session(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
    ) -> Result<SessionSnapshot, SessionsServiceError> {
        self.with_session(dealer, session, |entry| {
            entry
                .with_clock(|clock| clock.renew(Instant::now()))
                .map(|_expires_at| entry.snapshot(session))
                .map_err(|_expired| SessionsServiceError::Expired)
        })?
    }

    async fn record_activity(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
    ) -> Result<SessionActivity, SessionsServiceError> {
        self.with_session(dealer, session, |entry| {
            match entry.with_clock(|clock| clock.record_activity(Instant::now())) {
                ActivityOutcome::Renewed => Ok(SessionActivity {
                    renewed: true,
                    session: entry.snapshot(session),
                }),
                ActivityOutcome::Throttled => Ok(SessionActivity {
                    renewed: false,
                    session: entry.snapshot(session),
                }),
                ActivityOutcome::Expired => Err(SessionsServiceError::Expired),
            }
        })?
    }

    async fn end_session(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
    ) -> Result<(), SessionsServiceError> {
        let mut sessions = self.registry();

        if !sessions
            .get(&session)
            .is_some_and(|entry| entry.dealer == dealer)
        {
            return Err(SessionsServiceError::NotFound);
        }

        sessions.remove(&session);

        info!(session_uuid = %session, dealer_uuid = %dealer, "session ended");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SessionsService: Send + Sync {
    /// Open a session for the dealer with a fresh expiry clock.
    async fn start_session(&self, dealer: DealerUuid) -> SessionSnapshot;

    async fn get_session(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
    ) -> Result<SessionSnapshot, SessionsServiceError>;

    /// Explicit renewal; always applies.
    async fn renew_session(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
    ) -> Result<SessionSnapshot, SessionsServiceError>;

    /// Activity-triggered renewal, subject to the throttle.
    async fn record_activity(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
    ) -> Result<SessionActivity, SessionsServiceError>;

    /// Sign out; stops the session's timer.
    async fn end_session(
        &self,
        dealer: DealerUuid,
        session: SessionUuid,
    ) -> Result<(), SessionsServiceError>;
}
