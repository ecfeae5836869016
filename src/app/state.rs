use nomads_data::PopulationStats;
use std::collections::VecDeque;
use std::time::Duration;

/// Samples kept for each sparkline.
pub const HISTORY_LEN: usize = 120;
pub const MIN_PACING: Duration = Duration::from_millis(10);
pub const MAX_PACING: Duration = Duration::from_millis(2000);

/// Interactive state of the terminal front end. The simulation itself lives
/// in `Simulation`; this only tracks what the viewer controls and sees.
pub struct App {
    pub running: bool,
    pub paused: bool,
    pub tick_pacing: Duration,
    pub max_vegetation_fraction: f64,
    pub latest_stats: PopulationStats,
    pub pop_history: VecDeque<u64>,
    pub female_history: VecDeque<u64>,
}

impl App {
    pub fn new(tick_pacing: Duration, max_vegetation_fraction: f64) -> Self {
        Self {
            running: true,
            paused: false,
            tick_pacing: tick_pacing.clamp(MIN_PACING, MAX_PACING),
            max_vegetation_fraction,
            latest_stats: PopulationStats::default(),
            pop_history: VecDeque::with_capacity(HISTORY_LEN),
            female_history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    /// Records the current summary for the status bar and sparklines.
    pub fn observe(&mut self, stats: PopulationStats) {
        if self.pop_history.len() == HISTORY_LEN {
            self.pop_history.pop_front();
            self.female_history.pop_front();
        }
        self.pop_history.push_back(stats.population as u64);
        self.female_history
            .push_back((stats.female_ratio() * 100.0).round() as u64);
        self.latest_stats = stats;
    }

    pub fn speed_up(&mut self) {
        self.tick_pacing = (self.tick_pacing / 2).max(MIN_PACING);
    }

    pub fn slow_down(&mut self) {
        self.tick_pacing = (self.tick_pacing * 2).min(MAX_PACING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut app = App::new(Duration::from_millis(150), 0.3);
        for i in 0..(HISTORY_LEN + 10) {
            app.observe(PopulationStats {
                population: i,
                female_population: i / 2,
                ..Default::default()
            });
        }
        assert_eq!(app.pop_history.len(), HISTORY_LEN);
        assert_eq!(app.pop_history.back(), Some(&((HISTORY_LEN + 9) as u64)));
        assert_eq!(app.latest_stats.population, HISTORY_LEN + 9);
    }

    #[test]
    fn test_pacing_limits() {
        let mut app = App::new(Duration::from_millis(150), 0.3);
        for _ in 0..20 {
            app.speed_up();
        }
        assert_eq!(app.tick_pacing, MIN_PACING);
        for _ in 0..20 {
            app.slow_down();
        }
        assert_eq!(app.tick_pacing, MAX_PACING);
    }
}
