use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Sparkline, Widget};

/// Population and female-share history, newest sample last.
pub struct SparklinesWidget<'a> {
    pub pop_data: &'a [u64],
    /// Female share in percent.
    pub female_data: &'a [u64],
}

impl Widget for SparklinesWidget<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let spark_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Sparkline::default()
            .block(Block::default().title(" Population "))
            .data(self.pop_data)
            .style(Style::default().fg(Color::Green))
            .render(spark_layout[0], buf);

        Sparkline::default()
            .block(Block::default().title(" Female % "))
            .data(self.female_data)
            .max(100)
            .style(Style::default().fg(Color::Magenta))
            .render(spark_layout[1], buf);
    }
}
