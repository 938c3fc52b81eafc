//! Scheduled polling of a [`SessionClock`].

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval},
};
use tracing::trace;

use crate::domain::sessions::clock::{SessionClock, SessionEvent};

/// Event raised by a running timer, tagged with the session it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionNotice<K> {
    pub session: K,
    pub event: SessionEvent,
}

/// Handle to a task ticking a shared clock.
///
/// The task stops after forwarding expiry, when [`SessionTimer::stop`] is
/// called, or when the handle is dropped.
#[derive(Debug)]
pub struct SessionTimer {
    handle: JoinHandle<()>,
}

impl SessionTimer {
    /// Spawn the polling task on the current runtime.
    pub fn spawn<K>(
        session: K,
        clock: Arc<Mutex<SessionClock>>,
        period: Duration,
        notices: UnboundedSender<SessionNotice<K>>,
    ) -> Self
    where
        K: Copy + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let event = clock
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .tick(Instant::now());

                let Some(event) = event else {
                    continue;
                };

                trace!(?event, "session clock event");

                let delivered = notices.send(SessionNotice { session, event }).is_ok();

                if !delivered || matches!(event, SessionEvent::Expired) {
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Cancel the polling task.
    pub fn stop(self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use tokio::{sync::mpsc, time::sleep};

    use crate::domain::sessions::clock::SessionPolicy;

    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    fn shared_clock() -> Arc<Mutex<SessionClock>> {
        Arc::new(Mutex::new(SessionClock::start(
            SessionPolicy::default(),
            Instant::now(),
        )))
    }

    #[tokio::test(start_paused = true)]
    async fn forwards_warning_then_expiry_once_each() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let timer = SessionTimer::spawn(1_u8, shared_clock(), Duration::from_secs(1), sender);

        sleep(18 * MINUTE - Duration::from_millis(500)).await;

        assert!(receiver.try_recv().is_err(), "no warning before 18 minutes");

        sleep(Duration::from_secs(1)).await;

        assert!(matches!(
            receiver.try_recv(),
            Ok(SessionNotice {
                session: 1,
                event: SessionEvent::Warning { .. }
            })
        ));

        sleep(2 * MINUTE).await;

        assert!(matches!(
            receiver.try_recv(),
            Ok(SessionNotice {
                event: SessionEvent::Expired,
                ..
            })
        ));

        sleep(5 * MINUTE).await;

        assert!(receiver.try_recv().is_err(), "events fire only once");
        assert!(timer.is_finished(), "timer stops after expiry");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_task() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let timer = SessionTimer::spawn(1_u8, shared_clock(), Duration::from_secs(1), sender);

        drop(timer);

        sleep(30 * MINUTE).await;

        assert!(
            receiver.recv().await.is_none(),
            "channel closes once the task is gone"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn renewal_through_shared_clock_postpones_events() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let clock = shared_clock();
        let _timer = SessionTimer::spawn(1_u8, Arc::clone(&clock), Duration::from_secs(1), sender);

        sleep(10 * MINUTE).await;

        clock
            .lock()
            .expect("clock lock")
            .renew(Instant::now())
            .expect("renewable");

        sleep(17 * MINUTE).await;

        assert!(receiver.try_recv().is_err(), "renewal pushed the warning out");

        sleep(2 * MINUTE).await;

        assert!(matches!(
            receiver.try_recv(),
            Ok(SessionNotice {
                event: SessionEvent::Warning { .. },
                ..
            })
        ));
    }
}
