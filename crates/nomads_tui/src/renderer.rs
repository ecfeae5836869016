use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};
use ratatui::widgets::{Block, Borders, Widget};

use nomads_core::snapshot::{CellView, GridSnapshot};
use nomads_data::TribeId;

/// Draws the grid one terminal cell per world cell: water and plants as
/// coloured blocks, nomads as their marker in their tribe's colour.
pub struct WorldWidget<'a> {
    snapshot: &'a GridSnapshot,
    bordered: bool,
}

impl<'a> WorldWidget<'a> {
    pub fn new(snapshot: &'a GridSnapshot, bordered: bool) -> Self {
        Self { snapshot, bordered }
    }

    pub fn get_inner_area(area: Rect, bordered: bool) -> Rect {
        if bordered {
            Block::default().borders(Borders::ALL).inner(area)
        } else {
            area
        }
    }

    /// Terminal size needed to show the whole world, borders included.
    pub fn required_size(snapshot: &GridSnapshot, bordered: bool) -> (u16, u16) {
        let pad = if bordered { 2 } else { 0 };
        (snapshot.width + pad, snapshot.height + pad)
    }

    pub fn color_for_tribe(tribe: Option<TribeId>) -> Color {
        match tribe {
            None => Color::White,
            Some(TribeId::Red) => Color::LightRed,
            Some(TribeId::Cyan) => Color::LightCyan,
            Some(TribeId::Magenta) => Color::LightMagenta,
            Some(TribeId::Yellow) => Color::LightYellow,
        }
    }

    pub fn background_for(cell: CellView) -> Color {
        match cell {
            CellView::Water => Color::Blue,
            CellView::Vegetation => Color::Green,
            CellView::Open | CellView::Nomad { .. } => Color::Reset,
        }
    }

    pub fn world_to_screen(x: u16, y: u16, area: Rect, bordered: bool) -> Option<(u16, u16)> {
        let inner = Self::get_inner_area(area, bordered);
        let sx = inner.x.checked_add(y)?;
        let sy = inner.y.checked_add(x)?;
        (sx < inner.right() && sy < inner.bottom()).then_some((sx, sy))
    }
}

impl Widget for WorldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.bordered {
            Block::default()
                .title(format!(" Nomads (Tick: {}) ", self.snapshot.time))
                .borders(Borders::ALL)
                .render(area, buf);
        }

        for (x, row) in self.snapshot.rows().enumerate() {
            for (y, view) in row.iter().enumerate() {
                let Some((sx, sy)) =
                    Self::world_to_screen(x as u16, y as u16, area, self.bordered)
                else {
                    continue;
                };
                let cell = &mut buf[(sx, sy)];
                cell.set_bg(Self::background_for(*view));
                match *view {
                    CellView::Nomad { tribe, adult, .. } => {
                        cell.set_symbol(&view.symbol().to_string());
                        cell.set_fg(Self::color_for_tribe(tribe));
                        if adult {
                            cell.modifier.insert(Modifier::BOLD);
                        }
                    }
                    _ => {
                        cell.set_symbol(" ");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GridSnapshot {
        GridSnapshot {
            time: 7,
            width: 3,
            height: 2,
            cells: vec![
                CellView::Water,
                CellView::Open,
                CellView::Vegetation,
                CellView::Open,
                CellView::Nomad {
                    male: true,
                    adult: true,
                    pregnant: false,
                    tribe: Some(TribeId::Cyan),
                },
                CellView::Open,
            ],
        }
    }

    #[test]
    fn test_renders_markers_and_terrain() {
        let snap = snapshot();
        let area = Rect::new(0, 0, 5, 4);
        let mut buf = Buffer::empty(area);
        WorldWidget::new(&snap, true).render(area, &mut buf);

        // Row 1, column 1 of the world sits inside the border at (2, 2).
        assert_eq!(buf[(2, 2)].symbol(), "M");
        assert_eq!(buf[(2, 2)].fg, Color::LightCyan);
        assert_eq!(buf[(1, 1)].bg, Color::Blue);
        assert_eq!(buf[(3, 1)].bg, Color::Green);
    }

    #[test]
    fn test_small_area_clips() {
        let snap = snapshot();
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        WorldWidget::new(&snap, false).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, Color::Blue);
        assert_eq!(WorldWidget::world_to_screen(1, 1, area, false), None);
    }

    #[test]
    fn test_required_size() {
        assert_eq!(WorldWidget::required_size(&snapshot(), true), (5, 4));
    }
}
