//! Controller events, for hosts that want more than log lines.

use slotcar_core::{BodyId, RobotMode};

/// Something observable the controller did. Emitted once per occurrence, never per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotcarEvent {
    /// Emergency stop engaged. `blocker` is the body that triggered it.
    Stopping { tick: u64, blocker: Option<BodyId> },
    /// Emergency stop released.
    Resuming { tick: u64 },
    PathAccepted {
        tick: u64,
        task_id: String,
        waypoints: usize,
    },
    ModeChanged { tick: u64, mode: RobotMode },
    /// A wheel joint could not be bound at setup.
    MissingActuator { joint: String },
}

pub trait EventSink {
    fn emit(&mut self, event: SlotcarEvent);
}

#[derive(Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&mut self, _event: SlotcarEvent) {}
}

#[derive(Debug, Default)]
pub struct VecEventSink {
    pub events: Vec<SlotcarEvent>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&SlotcarEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn stops(&self) -> usize {
        self.count(|e| matches!(e, SlotcarEvent::Stopping { .. }))
    }

    pub fn resumes(&self) -> usize {
        self.count(|e| matches!(e, SlotcarEvent::Resuming { .. }))
    }
}

impl EventSink for VecEventSink {
    fn emit(&mut self, event: SlotcarEvent) {
        self.events.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: SlotcarEvent) {
        (**self).emit(event);
    }
}
