use ahash::AHashMap;
use getset::{CopyGetters, Getters};
use log::trace;
use std::rc::Rc;

use crate::core::{FeatureId, ObjectId, Value};

/// What changed on one feature of one object.
///
/// `Set` with equal old and new is a touch: the mutation was requested and
/// accepted but changed nothing. Indices in list changes are valid at the
/// moment the change happened, in event order.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Set {
        old: Value,
        new: Value,
    },
    Unset {
        old: Value,
    },
    Add {
        value: Value,
        index: usize,
    },
    Remove {
        value: Value,
        index: usize,
    },
    Move {
        value: Value,
        from: usize,
        to: usize,
    },
    /// The object itself changed container. `feature` on the event is the
    /// containment feature on the new side, or the old side on a detach.
    Container {
        old: Option<ObjectId>,
        new: Option<ObjectId>,
    },
}

impl Change {
    /// A set that changed nothing.
    pub fn is_touch(&self) -> bool {
        match self {
            Change::Set { old, new } => old == new,
            _ => false,
        }
    }
}

/// One change record, dispatched to observers after the mutation that
/// produced it has fully completed.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct Event {
    #[getset(get_copy = "pub")]
    object: ObjectId,
    #[getset(get_copy = "pub")]
    feature: FeatureId,
    #[getset(get = "pub")]
    change: Change,
}

impl Event {
    pub(crate) fn new(object: ObjectId, feature: FeatureId, change: Change) -> Self {
        Self {
            object,
            feature,
            change,
        }
    }
}

/// Receives events. Observers see the event only, never the model, so a
/// compound mutation is always fully applied by the time anything observes
/// it.
pub trait Observer {
    fn on_event(&self, event: &Event);
}

impl<F: Fn(&Event)> Observer for F {
    fn on_event(&self, event: &Event) {
        self(event)
    }
}

/// Handle for detaching an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

/// Pending events of one public operation.
///
/// Compound mutations (detach-then-attach, bulk replace) push every change
/// here and the model flushes once at the end, so observers never interleave
/// with a half-done operation.
#[derive(Debug, Default)]
pub(crate) struct Batch {
    events: Vec<Event>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Observer registry: whole-model observers plus per-object lists.
pub(crate) struct Observers {
    any: Vec<(ObserverId, Rc<dyn Observer>)>,
    per_object: AHashMap<ObjectId, Vec<(ObserverId, Rc<dyn Observer>)>>,
    next: u64,
}

impl Observers {
    pub fn new() -> Self {
        Self {
            any: Vec::new(),
            per_object: AHashMap::new(),
            next: 0,
        }
    }

    pub fn attach(&mut self, observer: Rc<dyn Observer>) -> ObserverId {
        let id = self.next_id();
        self.any.push((id, observer));
        id
    }

    pub fn attach_to(&mut self, object: ObjectId, observer: Rc<dyn Observer>) -> ObserverId {
        let id = self.next_id();
        self.per_object.entry(object).or_default().push((id, observer));
        id
    }

    pub fn detach(&mut self, id: ObserverId) {
        self.any.retain(|(i, _)| *i != id);
        for list in self.per_object.values_mut() {
            list.retain(|(i, _)| *i != id);
        }
        self.per_object.retain(|_, list| !list.is_empty());
    }

    /// Drops every observer attached to `object` (the object went away).
    pub fn forget(&mut self, object: ObjectId) {
        self.per_object.remove(&object);
    }

    pub fn dispatch(&self, events: &[Event]) {
        for event in events {
            trace!(
                "event on {} feature {}: {:?}",
                event.object(),
                event.feature(),
                event.change()
            );
            // Observer lists are snapshotted per event so a callback can't
            // shift them under us.
            let targeted: Vec<Rc<dyn Observer>> = self
                .any
                .iter()
                .map(|(_, o)| o.clone())
                .chain(
                    self.per_object
                        .get(&event.object())
                        .into_iter()
                        .flat_map(|l| l.iter().map(|(_, o)| o.clone())),
                )
                .collect();
            for observer in targeted {
                observer.on_event(event);
            }
        }
    }

    fn next_id(&mut self) -> ObserverId {
        let id = ObserverId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn ev(object: ObjectId) -> Event {
        Event::new(
            object,
            FeatureId::new(0),
            Change::Unset { old: Value::Null },
        )
    }

    #[test]
    fn per_object_observers_only_see_their_object() {
        let a = ObjectId::new(0, 0);
        let b = ObjectId::new(1, 0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut obs = Observers::new();
        let sink = seen.clone();
        obs.attach_to(a, Rc::new(move |e: &Event| sink.borrow_mut().push(e.object())));
        obs.dispatch(&[ev(a), ev(b), ev(a)]);
        assert_eq!(*seen.borrow(), vec![a, a]);
    }

    #[test]
    fn detached_observer_is_silent() {
        let a = ObjectId::new(0, 0);
        let seen = Rc::new(RefCell::new(0usize));
        let mut obs = Observers::new();
        let sink = seen.clone();
        let id = obs.attach(Rc::new(move |_: &Event| *sink.borrow_mut() += 1));
        obs.dispatch(&[ev(a)]);
        obs.detach(id);
        obs.dispatch(&[ev(a)]);
        assert_eq!(*seen.borrow(), 1);
    }
}
