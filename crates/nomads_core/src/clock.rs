/// Monotonic simulation time. Tick `t` is the step currently being played.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimClock {
    tick: u64,
}

impl SimClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(tick: u64) -> Self {
        Self { tick }
    }

    /// Advance by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Whether a periodic task with the given interval fires on this tick.
    /// Tick 0 fires for every interval; an interval of 0 never fires.
    #[must_use]
    pub fn is_due(&self, interval: u64) -> bool {
        interval != 0 && self.tick % interval == 0
    }
}
