//! Subscription registry for viewport intersection
//!
//! Hosts forward three kinds of events: scroll/resize ([`ViewportObserver::set_viewport`]),
//! layout ([`ViewportObserver::set_bounds`]) and element lifetime
//! ([`ViewportObserver::subscribe`] / [`ViewportObserver::unsubscribe`]). Every
//! event re-evaluates the affected observations and queues their boolean
//! transitions; consumers drain them with [`ViewportObserver::changes`].

use super::trigger::{ObserveOptions, VisibilityTrigger};
use crate::core_types::Rect;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// Handle to one observed element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationId(u64);

impl ObservationId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obs#{}", self.0)
    }
}

#[derive(Debug)]
struct Observation {
    trigger: VisibilityTrigger,
    pending: VecDeque<bool>,
}

impl Observation {
    fn refresh(&mut self, id: ObservationId, viewport: Option<&Rect>) {
        if let Some(visible) = self.trigger.evaluate(viewport) {
            debug!("{} visibility -> {}", id, visible);
            self.pending.push_back(visible);
        }
    }
}

/// Owns every visibility trigger of a view
#[derive(Debug, Default)]
pub struct ViewportObserver {
    viewport: Option<Rect>,
    observations: FxHashMap<ObservationId, Observation>,
    next_id: u64,
}

impl ViewportObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing an element; it is tested against the current viewport at once
    pub fn subscribe(&mut self, bounds: Option<Rect>, options: ObserveOptions) -> ObservationId {
        let id = ObservationId(self.next_id);
        self.next_id += 1;

        let mut observation = Observation {
            trigger: VisibilityTrigger::new(bounds, options),
            pending: VecDeque::new(),
        };
        observation.refresh(id, self.viewport.as_ref());
        self.observations.insert(id, observation);
        id
    }

    /// Scroll or resize: re-test every live observation
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
        for (id, observation) in &mut self.observations {
            observation.refresh(*id, Some(&viewport));
        }
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// Layout change for one element; `None` means it is no longer laid out
    ///
    /// Returns `false` for unknown observations.
    pub fn set_bounds(&mut self, id: ObservationId, bounds: Option<Rect>) -> bool {
        let Some(observation) = self.observations.get_mut(&id) else {
            return false;
        };
        if !observation.trigger.is_latched() {
            observation.trigger.set_bounds(bounds);
            observation.refresh(id, self.viewport.as_ref());
        }
        true
    }

    /// Drain queued transitions for one observation, oldest first
    pub fn changes(&mut self, id: ObservationId) -> Vec<bool> {
        self.observations
            .get_mut(&id)
            .map(|observation| observation.pending.drain(..).collect())
            .unwrap_or_default()
    }

    /// Drain queued transitions for every observation, ordered by id
    pub fn drain_changes(&mut self) -> Vec<(ObservationId, bool)> {
        let mut changes: Vec<(ObservationId, bool)> = self
            .observations
            .iter_mut()
            .flat_map(|(id, observation)| observation.pending.drain(..).map(move |v| (*id, v)))
            .collect();
        changes.sort_by_key(|(id, _)| *id);
        changes
    }

    /// Current state; unknown observations are not visible
    pub fn is_visible(&self, id: ObservationId) -> bool {
        self.observations
            .get(&id)
            .is_some_and(|observation| observation.trigger.is_visible())
    }

    pub fn trigger(&self, id: ObservationId) -> Option<&VisibilityTrigger> {
        self.observations.get(&id).map(|observation| &observation.trigger)
    }

    /// Stop observing; pending transitions are discarded
    pub fn unsubscribe(&mut self, id: ObservationId) -> bool {
        self.observations.remove(&id).is_some()
    }

    /// Deregister every observation
    pub fn disconnect(&mut self) {
        debug!("Disconnecting {} observations", self.observations.len());
        self.observations.clear();
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
