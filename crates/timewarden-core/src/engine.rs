//! The enforcement engine
//!
//! Owns the registry, session tracker, and usage ledger, and drives them
//! from two entry points: foreground signals and the periodic check. The
//! caller serializes both onto one queue; nothing here is re-entrant.

use chrono::NaiveDate;
use std::sync::Arc;
use timewarden_api::{BlockedItem, UsageSnapshot};
use timewarden_config::Settings;
use timewarden_store::ConfigStore;
use timewarden_util::MonotonicInstant;
use tracing::{info, warn};

use crate::{
    evaluate, EngineEvent, Matcher, Registry, SessionTracker, TrackerEvent, UsageLedger, Verdict,
    BlockDispatcher,
};

pub struct Engine {
    registry: Registry,
    matcher: Matcher,
    tracker: SessionTracker,
    ledger: UsageLedger,
    dispatcher: Arc<dyn BlockDispatcher>,
}

impl Engine {
    /// Build the engine: load the registry (seeding defaults on first
    /// run), load today's ledger, and run the daily rollover once.
    pub fn new(
        settings: &Settings,
        store: Arc<dyn ConfigStore>,
        dispatcher: Arc<dyn BlockDispatcher>,
        today: NaiveDate,
    ) -> Self {
        let (registry, seeded) = Registry::load(store.as_ref(), settings.default_group_limit_minutes);
        let mut ledger = UsageLedger::load(store, &registry.group_ids());
        let rolled = ledger.rollover_if_new_day(today);

        let default_group = timewarden_util::GroupId::default_group();
        info!(
            item_count = registry.items().len(),
            seeded_defaults = seeded,
            day_rolled_over = rolled,
            default_limit_minutes = registry.limit_minutes(&default_group),
            default_group_usage_ms = ledger.group_usage(&default_group),
            "Engine initialized"
        );

        Self {
            registry,
            matcher: Matcher::new(settings.browsers.clone()),
            tracker: SessionTracker::new(),
            ledger,
            dispatcher,
        }
    }

    /// Handle a foreground signal: resolve it against the blocklist, run
    /// the session state machine, commit any closed session's duration,
    /// and evaluate the limit reactively.
    pub fn handle_foreground(
        &mut self,
        package: Option<&str>,
        url: Option<&str>,
        now: MonotonicInstant,
        today: NaiveDate,
    ) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.rollover(today, &mut events);

        let matched = self
            .matcher
            .resolve(self.registry.items(), package, url)
            .cloned();

        for tracker_event in self.tracker.observe(matched.as_ref(), now) {
            match tracker_event {
                TrackerEvent::SessionClosed {
                    session_id,
                    item,
                    duration,
                } => {
                    self.ledger.commit(&item, duration.as_millis() as i64);
                    events.push(EngineEvent::SessionClosed {
                        session_id,
                        item: item.clone(),
                        duration,
                    });

                    // Reactive evaluation: the duration is already folded
                    // into the committed counter, in-progress is zero.
                    let committed = self.ledger.group_usage(&item.group_id);
                    let limit = self.registry.limit_minutes(&item.group_id);
                    if evaluate(limit, committed, 0) == Verdict::Block {
                        self.fire_block(&item, &mut events);
                    }
                }
                TrackerEvent::SessionOpened { session_id, item } => {
                    events.push(EngineEvent::SessionOpened { session_id, item });
                }
            }
        }

        events
    }

    /// Periodic evaluation while a session stays open. Lets a block fire
    /// mid-session without waiting for the user to navigate away. The
    /// caller reschedules this with a fixed delay after it returns.
    pub fn periodic_check(
        &mut self,
        now: MonotonicInstant,
        today: NaiveDate,
    ) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.rollover(today, &mut events);

        let Some(session) = self.tracker.current() else {
            return events;
        };

        let group = session.item.group_id.clone();
        let committed = self.ledger.group_usage(&group);
        let in_progress = session.elapsed(now).as_millis() as u64;
        let limit = self.registry.limit_minutes(&group);

        if evaluate(limit, committed, in_progress) == Verdict::Block {
            warn!(
                item = session.item.label(),
                group = %group,
                committed_ms = committed,
                in_progress_ms = in_progress,
                limit_minutes = limit,
                "Periodic check: group allowance exhausted"
            );

            // Close first so the partial duration is committed exactly
            // once; the next foreground signal starts a fresh session.
            if let Some(TrackerEvent::SessionClosed {
                session_id,
                item,
                duration,
            }) = self.tracker.close(now)
            {
                self.ledger.commit(&item, duration.as_millis() as i64);
                events.push(EngineEvent::SessionClosed {
                    session_id,
                    item: item.clone(),
                    duration,
                });
                self.fire_block(&item, &mut events);
            }
        }

        events
    }

    /// Teardown: force-close any open session (committing its partial
    /// duration) and flush both ledgers. The caller must have cancelled
    /// the periodic timer first.
    pub fn shutdown(&mut self, now: MonotonicInstant) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        if let Some(TrackerEvent::SessionClosed {
            session_id,
            item,
            duration,
        }) = self.tracker.close(now)
        {
            self.ledger.commit(&item, duration.as_millis() as i64);
            events.push(EngineEvent::SessionClosed {
                session_id,
                item,
                duration,
            });
        }

        self.ledger.flush();
        info!("Engine shut down, usage flushed");

        events
    }

    fn fire_block(&self, item: &BlockedItem, events: &mut Vec<EngineEvent>) {
        self.dispatcher.request_block(item);
        events.push(EngineEvent::BlockRequested {
            item: item.clone(),
            group_usage_millis: self.ledger.group_usage(&item.group_id),
        });
    }

    fn rollover(&mut self, today: NaiveDate, events: &mut Vec<EngineEvent>) {
        if self.ledger.rollover_if_new_day(today) {
            events.push(EngineEvent::DayRolledOver { day: today });
        }
    }

    pub fn has_active_session(&self) -> bool {
        self.tracker.current().is_some()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn usage_snapshot(&self) -> UsageSnapshot {
        self.ledger.snapshot()
    }
}
