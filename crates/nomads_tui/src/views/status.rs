use nomads_data::PopulationStats;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Gauge, Paragraph, Widget};

pub struct StatusWidget<'a> {
    pub stats: &'a PopulationStats,
    pub paused: bool,
    pub tick_pacing_ms: u64,
    pub max_vegetation_fraction: f64,
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let state = if self.paused {
            ("PAUSED", Color::Yellow)
        } else {
            ("RUNNING", Color::Green)
        };
        Paragraph::new(format!(
            " {} | Tick: {} | Nomads: {} ({} female) | {} ms/tick",
            state.0,
            self.stats.time,
            self.stats.population,
            self.stats.female_population,
            self.tick_pacing_ms
        ))
        .style(
            Style::default()
                .fg(state.1)
                .add_modifier(Modifier::BOLD),
        )
        .render(lines[0], buf);

        let cap = self.max_vegetation_fraction.max(f64::EPSILON);
        let ratio = (self.stats.vegetation_fraction() / cap).clamp(0.0, 1.0);
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(format!(
                "Plants: {} ({:.1}% of world)",
                self.stats.vegetation_count,
                self.stats.vegetation_fraction() * 100.0
            ))
            .render(lines[1], buf);

        Paragraph::new(format!(
            " Sense {:.2} | Stamina {:.2} | Allegiance {:.2} | Tribal {:.2}   [q] quit [space] pause [+/-] speed",
            self.stats.mean_sense,
            self.stats.mean_stamina,
            self.stats.mean_allegiance,
            self.stats.mean_tribal_loyalty
        ))
        .style(Style::default().fg(Color::Gray))
        .render(lines[2], buf);
    }
}
