use slotcar_core::ControlTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopState {
    #[default]
    Running,
    Stopped,
}

/// Edge reported by [`StopArbiter::observe`]. At most one per actual state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopTransition {
    /// `Running -> Stopped`.
    Stopping,
    /// `Stopped -> Running`.
    Resuming,
}

impl StopTransition {
    pub fn message(self) -> &'static str {
        match self {
            StopTransition::Stopping => "Stopping vehicle to avoid a collision",
            StopTransition::Resuming => "No more obstacles; resuming course",
        }
    }
}

/// Emergency-stop latch with hysteresis on the monitor verdict.
///
/// While stopped the vehicle may still rotate in place; only translation is vetoed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StopArbiter {
    state: StopState,
}

impl StopArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StopState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == StopState::Stopped
    }

    /// Feed this tick's verdict. Returns the transition if the state changed.
    pub fn observe(&mut self, blocked: bool) -> Option<StopTransition> {
        match (self.state, blocked) {
            (StopState::Running, true) => {
                self.state = StopState::Stopped;
                Some(StopTransition::Stopping)
            }
            (StopState::Stopped, false) => {
                self.state = StopState::Running;
                Some(StopTransition::Resuming)
            }
            _ => None,
        }
    }

    pub fn apply(&self, target: ControlTarget) -> ControlTarget {
        match self.state {
            StopState::Running => target,
            StopState::Stopped => target.without_translation(),
        }
    }
}
