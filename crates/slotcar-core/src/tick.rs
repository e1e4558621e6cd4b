/// Tracks the simulation time of the previous tick and derives the elapsed time.
///
/// The recorded time is replaced on every call, whether or not the caller goes on to apply
/// control that tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElapsedClock {
    last_update_time: f64,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_update_time(&self) -> f64 {
        self.last_update_time
    }

    /// Record `now` and return `now - previous`.
    pub fn advance(&mut self, now: f64) -> f64 {
        let dt = now - self.last_update_time;
        self.last_update_time = now;
        dt
    }
}
