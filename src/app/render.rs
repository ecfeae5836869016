use crate::app::state::App;
use nomads_core::snapshot::GridSnapshot;
use nomads_tui::views::{SparklinesWidget, StatusWidget};
use nomads_tui::WorldWidget;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

impl App {
    pub fn draw(&self, f: &mut Frame, snapshot: &GridSnapshot) {
        let (_, world_height) = WorldWidget::required_size(snapshot, true);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(world_height),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(f.area());

        f.render_widget(WorldWidget::new(snapshot, true), chunks[0]);
        f.render_widget(
            StatusWidget {
                stats: &self.latest_stats,
                paused: self.paused,
                tick_pacing_ms: self.tick_pacing.as_millis() as u64,
                max_vegetation_fraction: self.max_vegetation_fraction,
            },
            chunks[1],
        );

        let pop: Vec<u64> = self.pop_history.iter().copied().collect();
        let female: Vec<u64> = self.female_history.iter().copied().collect();
        f.render_widget(
            SparklinesWidget {
                pop_data: &pop,
                female_data: &female,
            },
            chunks[2],
        );
    }
}
