use crate::obs::sink::MetricsEvent;
use parking_lot::RwLock;
use std::collections::BTreeMap;

///
/// Metrics
/// Ephemeral, in-memory counters for reference resolution activity.
/// Process-global because references travel across threads.
///

#[derive(Clone, Debug)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) entities: BTreeMap<String, EntityCounters>,
}

impl EventState {
    const fn new() -> Self {
        Self {
            ops: EventOps::new(),
            entities: BTreeMap::new(),
        }
    }

    /// Fold one event into the running totals.
    pub(crate) fn apply(&mut self, event: MetricsEvent) {
        match event {
            MetricsEvent::ResolveOk { entity_path } => {
                self.ops.resolves = self.ops.resolves.saturating_add(1);

                let entry = self.entities.entry(entity_path.to_string()).or_default();
                entry.resolves = entry.resolves.saturating_add(1);
            }

            MetricsEvent::ResolveFail {
                entity_path,
                not_found,
            } => {
                self.ops.resolves = self.ops.resolves.saturating_add(1);
                self.ops.resolve_fails = self.ops.resolve_fails.saturating_add(1);
                if not_found {
                    self.ops.not_found = self.ops.not_found.saturating_add(1);
                }

                let entry = self.entities.entry(entity_path.to_string()).or_default();
                entry.resolves = entry.resolves.saturating_add(1);
                entry.resolve_fails = entry.resolve_fails.saturating_add(1);
                if not_found {
                    entry.not_found = entry.not_found.saturating_add(1);
                }
            }

            MetricsEvent::StateHit { entity_path } => {
                self.ops.state_hits = self.ops.state_hits.saturating_add(1);

                let entry = self.entities.entry(entity_path.to_string()).or_default();
                entry.state_hits = entry.state_hits.saturating_add(1);
            }

            MetricsEvent::Invalidate { entity_path } => {
                self.ops.invalidations = self.ops.invalidations.saturating_add(1);

                let entry = self.entities.entry(entity_path.to_string()).or_default();
                entry.invalidations = entry.invalidations.saturating_add(1);
            }
        }
    }

    /// Point-in-time copy with entities in path order.
    pub(crate) fn snapshot(&self) -> EventReport {
        EventReport {
            ops: self.ops,
            entities: self
                .entities
                .iter()
                .map(|(path, counters)| (path.clone(), *counters))
                .collect(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EventOps {
    /// Store lookups issued, successful or not.
    pub resolves: u64,
    /// Lookups that ended in a remembered failure.
    pub resolve_fails: u64,
    /// Failed lookups where the entity was simply missing.
    pub not_found: u64,
    /// Accesses served from an existing terminal state, no store call.
    pub state_hits: u64,
    /// Explicit invalidations.
    pub invalidations: u64,
}

impl EventOps {
    const fn new() -> Self {
        Self {
            resolves: 0,
            resolve_fails: 0,
            not_found: 0,
            state_hits: 0,
            invalidations: 0,
        }
    }
}

///
/// EntityCounters
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EntityCounters {
    pub resolves: u64,
    pub resolve_fails: u64,
    pub not_found: u64,
    pub state_hits: u64,
    pub invalidations: u64,
}

///
/// EventReport
///
/// Point-in-time snapshot; entities are sorted by path.
///

#[derive(Clone, Debug)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: Vec<(String, EntityCounters)>,
}

impl EventReport {
    /// Counters for one entity path, defaulting to zeroes when unseen.
    #[must_use]
    pub fn entity(&self, path: &str) -> EntityCounters {
        self.entities
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, counters)| *counters)
            .unwrap_or_default()
    }
}

static EVENT_STATE: RwLock<EventState> = RwLock::new(EventState::new());

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    f(&EVENT_STATE.read())
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    f(&mut EVENT_STATE.write())
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::new());
}

/// Snapshot the current metrics state.
pub(crate) fn report() -> EventReport {
    with_state(EventState::snapshot)
}

/// Serializes tests that read or reset the process-global state.
#[cfg(test)]
pub(crate) static TEST_MUTEX: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

///
/// TESTS
///
