use crate::error::{SimError, SimResult};
use nomads_data::{NomadId, Position, TerrainLayout, Tile};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Orthogonal neighbour offsets in scan order: up, down, left, right.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub trait TerrainLogic {
    fn symbol(&self) -> char;
    fn is_passable(&self) -> bool;
}

impl TerrainLogic for Tile {
    fn symbol(&self) -> char {
        match self {
            Tile::Open => '.',
            Tile::Water => '~',
            Tile::Vegetation => '*',
        }
    }

    fn is_passable(&self) -> bool {
        matches!(self, Tile::Open)
    }
}

/// What a neighbouring cell holds, from the point of view of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborContent {
    Open,
    Water,
    Vegetation,
    Occupied(NomadId),
}

/// The world: a `height x width` tile array with an occupancy overlay.
///
/// A cell shows either its terrain or the nomad standing on it. Vacating an
/// occupied cell always leaves Open ground behind.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u16,
    height: u16,
    tiles: Vec<Tile>,
    occupants: HashMap<Position, NomadId>,
}

impl Grid {
    /// Creates an all-Open grid. Dimensions are validated by the config layer.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Open; width as usize * height as usize],
            occupants: HashMap::new(),
        }
    }

    /// Builds a grid whose water comes from an external layout.
    pub fn from_layout(layout: &TerrainLayout) -> SimResult<Self> {
        let cells = layout.width as usize * layout.height as usize;
        if layout.width == 0 || layout.height == 0 || layout.water.len() != cells {
            return Err(SimError::LayoutMismatch {
                width: layout.width,
                height: layout.height,
                actual_width: layout.width,
                actual_height: layout.height,
                cells: layout.water.len(),
            });
        }
        let tiles = layout
            .water
            .iter()
            .map(|&w| if w { Tile::Water } else { Tile::Open })
            .collect();
        Ok(Self {
            width: layout.width,
            height: layout.height,
            tiles,
            occupants: HashMap::new(),
        })
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.is_in_bounds(pos)
            .then(|| pos.x as usize * self.width as usize + pos.y as usize)
    }

    #[must_use]
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x < self.height && pos.y < self.width
    }

    /// In bounds, Open terrain and nobody standing there.
    #[must_use]
    pub fn is_open(&self, pos: Position) -> bool {
        self.index(pos)
            .is_some_and(|i| self.tiles[i].is_passable() && !self.occupants.contains_key(&pos))
    }

    /// Terrain under `pos`. Out-of-bounds reads as Open.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Tile {
        self.index(pos).map_or(Tile::Open, |i| self.tiles[i])
    }

    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> SimResult<()> {
        let i = self.index(pos).ok_or(SimError::OutOfBounds(pos))?;
        self.tiles[i] = tile;
        Ok(())
    }

    #[must_use]
    pub fn occupant_at(&self, pos: Position) -> Option<NomadId> {
        self.occupants.get(&pos).copied()
    }

    /// Content of a single cell, or `None` when out of bounds.
    #[must_use]
    pub fn content_at(&self, pos: Position) -> Option<NeighborContent> {
        let i = self.index(pos)?;
        if let Some(id) = self.occupants.get(&pos) {
            return Some(NeighborContent::Occupied(*id));
        }
        Some(match self.tiles[i] {
            Tile::Open => NeighborContent::Open,
            Tile::Water => NeighborContent::Water,
            Tile::Vegetation => NeighborContent::Vegetation,
        })
    }

    /// In-bounds orthogonal neighbours in [`NEIGHBOR_OFFSETS`] order.
    #[must_use]
    pub fn neighbors4(&self, pos: Position) -> Vec<(Position, NeighborContent)> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let n = pos.offset(dx, dy)?;
                Some((n, self.content_at(n)?))
            })
            .collect()
    }

    /// Puts a nomad on an open cell.
    pub fn place(&mut self, pos: Position, id: NomadId) -> SimResult<()> {
        if !self.is_in_bounds(pos) {
            return Err(SimError::OutOfBounds(pos));
        }
        if !self.is_open(pos) {
            return Err(SimError::CellOccupied { id, position: pos });
        }
        self.occupants.insert(pos, id);
        Ok(())
    }

    /// Clears occupancy. The cell reverts to Open ground.
    pub fn vacate(&mut self, pos: Position) -> Option<NomadId> {
        let id = self.occupants.remove(&pos)?;
        if let Some(i) = self.index(pos) {
            self.tiles[i] = Tile::Open;
        }
        Some(id)
    }

    /// Moves whoever stands on `from` to `to`. Callers check `is_open(to)` first.
    pub fn move_agent(&mut self, from: Position, to: Position) -> SimResult<()> {
        let id = self.occupants.get(&from).copied().ok_or(SimError::OutOfBounds(from))?;
        if !self.is_open(to) {
            return Err(SimError::CellOccupied { id, position: to });
        }
        self.vacate(from);
        self.occupants.insert(to, id);
        Ok(())
    }

    /// Eats the plant at `pos`. Returns whether there was one.
    pub fn consume_vegetation(&mut self, pos: Position) -> bool {
        match self.index(pos) {
            Some(i) if self.tiles[i] == Tile::Vegetation => {
                self.tiles[i] = Tile::Open;
                true
            }
            _ => false,
        }
    }

    /// Grows up to `count` plants on distinct random open cells, unless
    /// `known_plants` already covers `max_fraction` of the area. Returns how many grew.
    ///
    /// `known_plants` is the caller's count, which may lag behind the tiles.
    pub fn grow_vegetation<R: Rng>(
        &mut self,
        known_plants: usize,
        count: usize,
        max_fraction: f64,
        rng: &mut R,
    ) -> usize {
        if (known_plants as f64 / self.area() as f64) >= max_fraction {
            return 0;
        }
        self.sprout_vegetation(count, rng)
    }

    fn sprout_vegetation<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let open: Vec<Position> = self.positions().filter(|&p| self.is_open(p)).collect();
        let chosen: Vec<Position> = open.choose_multiple(rng, count).copied().collect();
        for &pos in &chosen {
            if let Some(i) = self.index(pos) {
                self.tiles[i] = Tile::Vegetation;
            }
        }
        chosen.len()
    }

    #[must_use]
    pub fn vegetation_count(&self) -> usize {
        self.tiles.iter().filter(|t| **t == Tile::Vegetation).count()
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupants.len()
    }

    /// Every in-bounds position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |x| (0..width).map(move |y| Position::new(x, y)))
    }

    /// Occupied cells and their nomads, in no particular order.
    pub fn occupants(&self) -> impl Iterator<Item = (Position, NomadId)> + '_ {
        self.occupants.iter().map(|(p, id)| (*p, *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    fn id(n: u128) -> NomadId {
        NomadId(Uuid::from_u128(n))
    }

    #[test]
    fn test_terrain_symbols() {
        assert_eq!(Tile::Water.symbol(), '~');
        assert_eq!(Tile::Vegetation.symbol(), '*');
        assert!(Tile::Open.is_passable());
        assert!(!Tile::Water.is_passable());
    }

    #[test]
    fn test_bounds_and_open() {
        let mut grid = Grid::new(4, 3);
        assert!(grid.is_in_bounds(Position::new(2, 3)));
        assert!(!grid.is_in_bounds(Position::new(3, 0)));
        assert!(!grid.is_open(Position::new(0, 4)));

        grid.set_tile(Position::new(1, 1), Tile::Water).unwrap();
        assert!(!grid.is_open(Position::new(1, 1)));
        assert!(grid.set_tile(Position::new(9, 9), Tile::Water).is_err());
    }

    #[test]
    fn test_neighbors_order_and_edges() {
        let mut grid = Grid::new(3, 3);
        grid.set_tile(Position::new(0, 1), Tile::Water).unwrap();
        grid.set_tile(Position::new(1, 0), Tile::Vegetation).unwrap();
        grid.place(Position::new(2, 1), id(1)).unwrap();

        let n = grid.neighbors4(Position::new(1, 1));
        assert_eq!(
            n,
            vec![
                (Position::new(0, 1), NeighborContent::Water),
                (Position::new(2, 1), NeighborContent::Occupied(id(1))),
                (Position::new(1, 0), NeighborContent::Vegetation),
                (Position::new(1, 2), NeighborContent::Open),
            ]
        );

        // Corner only has two neighbours.
        assert_eq!(grid.neighbors4(Position::new(0, 0)).len(), 2);
    }

    #[test]
    fn test_place_rejects_taken_cells() {
        let mut grid = Grid::new(3, 3);
        let p = Position::new(1, 1);
        grid.place(p, id(1)).unwrap();
        assert!(matches!(grid.place(p, id(2)), Err(SimError::CellOccupied { .. })));
        assert!(matches!(
            grid.place(Position::new(5, 5), id(2)),
            Err(SimError::OutOfBounds(_))
        ));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_move_and_vacate_restore_open() {
        let mut grid = Grid::new(3, 3);
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        grid.place(a, id(7)).unwrap();
        grid.move_agent(a, b).unwrap();
        assert!(grid.is_open(a));
        assert_eq!(grid.occupant_at(b), Some(id(7)));

        assert_eq!(grid.vacate(b), Some(id(7)));
        assert_eq!(grid.tile_at(b), Tile::Open);
        assert!(grid.is_open(b));
    }

    #[test]
    fn test_consume_vegetation() {
        let mut grid = Grid::new(2, 2);
        let p = Position::new(1, 1);
        grid.set_tile(p, Tile::Vegetation).unwrap();
        assert!(grid.consume_vegetation(p));
        assert!(!grid.consume_vegetation(p));
        assert_eq!(grid.tile_at(p), Tile::Open);
    }

    #[test]
    fn test_grow_vegetation_respects_cap_and_space() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut grid = Grid::new(10, 10);
        let grown = grid.grow_vegetation(0, 10, 0.3, &mut rng);
        assert_eq!(grown, 10);
        assert_eq!(grid.vegetation_count(), 10);

        for _ in 0..5 {
            let known = grid.vegetation_count();
            grid.grow_vegetation(known, 10, 0.3, &mut rng);
        }
        assert!(grid.vegetation_count() <= 30 + 10);
        let known = grid.vegetation_count();
        assert_eq!(grid.grow_vegetation(known, 10, 0.3, &mut rng), 0);
        // A stale count under the cap still grows.
        assert_eq!(grid.grow_vegetation(0, 10, 0.9, &mut rng), 10);
    }

    #[test]
    fn test_grow_vegetation_on_full_grid_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = Grid::new(2, 1);
        grid.place(Position::new(0, 0), id(1)).unwrap();
        grid.set_tile(Position::new(0, 1), Tile::Water).unwrap();
        assert_eq!(grid.grow_vegetation(0, 5, 1.0, &mut rng), 0);
    }

    #[test]
    fn test_from_layout_rejects_wrong_mask() {
        let layout = TerrainLayout {
            width: 3,
            height: 2,
            water: vec![true; 5],
        };
        assert!(matches!(
            Grid::from_layout(&layout),
            Err(SimError::LayoutMismatch { .. })
        ));
    }
}
