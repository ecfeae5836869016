//! Read-only views of the world handed to renderers.

use crate::error::{SimError, SimResult};
use crate::grid::{Grid, TerrainLogic};
use crate::population::Population;
use nomads_data::{Nomad, Position, Tile, TribeId};
use serde::{Deserialize, Serialize};

/// What one cell looks like from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Open,
    Water,
    Vegetation,
    Nomad {
        male: bool,
        adult: bool,
        pregnant: bool,
        tribe: Option<TribeId>,
    },
}

impl CellView {
    fn of_nomad(nomad: &Nomad) -> Self {
        CellView::Nomad {
            male: !nomad.sex.is_female(),
            adult: nomad.adult,
            pregnant: nomad.sex.is_pregnant(),
            tribe: nomad.tribe,
        }
    }

    /// Plain-text glyph: `m`/`f` juveniles, `M`/`F` adults, `P` pregnant.
    #[must_use]
    pub fn symbol(&self) -> char {
        match self {
            CellView::Open => Tile::Open.symbol(),
            CellView::Water => Tile::Water.symbol(),
            CellView::Vegetation => Tile::Vegetation.symbol(),
            CellView::Nomad { pregnant: true, .. } => 'P',
            CellView::Nomad {
                male: true,
                adult: false,
                ..
            } => 'm',
            CellView::Nomad { male: true, .. } => 'M',
            CellView::Nomad { adult: false, .. } => 'f',
            CellView::Nomad { .. } => 'F',
        }
    }
}

/// Row-major copy of the grid at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub time: u64,
    pub width: u16,
    pub height: u16,
    pub cells: Vec<CellView>,
}

impl GridSnapshot {
    pub fn capture(time: u64, grid: &Grid, population: &Population) -> SimResult<Self> {
        let cells = grid
            .positions()
            .map(|p| match grid.occupant_at(p) {
                Some(id) => population
                    .get(id)
                    .map(CellView::of_nomad)
                    .ok_or(SimError::UnknownOccupant { id, position: p }),
                None => Ok(match grid.tile_at(p) {
                    Tile::Open => CellView::Open,
                    Tile::Water => CellView::Water,
                    Tile::Vegetation => CellView::Vegetation,
                }),
            })
            .collect::<SimResult<Vec<_>>>()?;
        Ok(Self {
            time,
            width: grid.width(),
            height: grid.height(),
            cells,
        })
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<CellView> {
        if pos.x >= self.height || pos.y >= self.width {
            return None;
        }
        self.cells
            .get(pos.x as usize * self.width as usize + pos.y as usize)
            .copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    #[must_use]
    pub fn nomad_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, CellView::Nomad { .. }))
            .count()
    }
}

impl std::fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(CellView::symbol).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nomad::fixed_id;
    use nomads_data::{Genome, Goal, Sex};

    #[test]
    fn test_text_render() {
        let mut grid = Grid::new(4, 2);
        grid.set_tile(Position::new(0, 0), Tile::Water).unwrap();
        grid.set_tile(Position::new(1, 3), Tile::Vegetation).unwrap();
        let nomad = Nomad {
            id: fixed_id(1),
            position: Position::new(1, 1),
            birth_time: 0,
            adult_age: 40,
            adult: true,
            genome: Genome::new(4, 30, 5),
            sex: Sex::female(0.5),
            thirst: 0,
            hunger: 0,
            lifespan: 800,
            tribe: Some(TribeId::Yellow),
            allegiance: 2,
            goal: Goal::Drink,
            target: None,
            generation: 0,
        };
        let mut population = Population::new(Vec::new(), &grid);
        population.add(nomad, &mut grid).unwrap();

        let snapshot = GridSnapshot::capture(5, &grid, &population).unwrap();
        assert_eq!(snapshot.to_string(), "~...\n.F.*\n");
        assert_eq!(snapshot.nomad_count(), 1);
        assert_eq!(
            snapshot.cell(Position::new(1, 1)),
            Some(CellView::Nomad {
                male: false,
                adult: true,
                pregnant: false,
                tribe: Some(TribeId::Yellow),
            })
        );
        assert_eq!(snapshot.cell(Position::new(2, 0)), None);
    }

    #[test]
    fn test_stray_occupant_fails_capture() {
        let mut grid = Grid::new(2, 2);
        grid.place(Position::new(0, 0), fixed_id(3)).unwrap();
        let population = Population::new(Vec::new(), &grid);
        assert!(GridSnapshot::capture(0, &grid, &population).is_err());
    }
}
