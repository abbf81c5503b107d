//! Session state machine
//!
//! States are Idle and Tracking(item). At most one session is open at a
//! time. A session is identified by its item's identifier alone: display
//! name or group edits do not reopen a session.

use timewarden_api::BlockedItem;
use timewarden_util::{MonotonicInstant, SessionId};
use tracing::debug;

/// The open-ended interval during which a specific blocked item is
/// continuously the matched foreground target. Never persisted and never
/// shared; the ledger only ever receives a duration.
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub item: BlockedItem,
    pub started_at: MonotonicInstant,
}

impl Session {
    fn new(item: BlockedItem, now: MonotonicInstant) -> Self {
        Self {
            id: SessionId::new(),
            item,
            started_at: now,
        }
    }

    /// In-progress duration not yet committed to the ledger
    pub fn elapsed(&self, now: MonotonicInstant) -> std::time::Duration {
        now.duration_since(self.started_at)
    }
}

/// Transition observed for a single foreground signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// A session ended; `duration` is the elapsed time to commit.
    SessionClosed {
        session_id: SessionId,
        item: BlockedItem,
        duration: std::time::Duration,
    },

    /// A session began for a newly matched item.
    SessionOpened {
        session_id: SessionId,
        item: BlockedItem,
    },
}

/// Tracks which configured item is currently "active"
#[derive(Debug, Default)]
pub struct SessionTracker {
    current: Option<Session>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Apply the latest match result. Returns zero, one, or two events;
    /// on a direct item-to-item switch the close always precedes the open
    /// so the duration is committed against the correct group.
    pub fn observe(
        &mut self,
        matched: Option<&BlockedItem>,
        now: MonotonicInstant,
    ) -> Vec<TrackerEvent> {
        let same_item = match (&self.current, matched) {
            (Some(session), Some(item)) => session.item.identifier == item.identifier,
            (None, None) => true,
            _ => false,
        };
        if same_item {
            // Duplicate delivery of the same signal is a no-op.
            return Vec::new();
        }

        let mut events = Vec::new();

        if let Some(closed) = self.close(now) {
            events.push(closed);
        }

        if let Some(item) = matched {
            let session = Session::new(item.clone(), now);
            debug!(
                session_id = %session.id,
                item = item.label(),
                group = %item.group_id,
                "Session opened"
            );
            events.push(TrackerEvent::SessionOpened {
                session_id: session.id.clone(),
                item: item.clone(),
            });
            self.current = Some(session);
        }

        events
    }

    /// Close any open session, returning its close event. Used by the
    /// enforcer before dispatching a block and by engine teardown.
    pub fn close(&mut self, now: MonotonicInstant) -> Option<TrackerEvent> {
        let session = self.current.take()?;
        let duration = session.elapsed(now);
        debug!(
            session_id = %session.id,
            item = session.item.label(),
            duration_ms = duration.as_millis() as u64,
            "Session closed"
        );
        Some(TrackerEvent::SessionClosed {
            session_id: session.id,
            item: session.item,
            duration,
        })
    }
}
