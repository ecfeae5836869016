//! Initial world construction: terrain, vegetation and founding nomads.

use crate::config::{NomadConfig, WorldConfig};
use crate::error::{SimError, SimResult};
use crate::grid::Grid;
use crate::nomad::{Lineage, NomadLogic};
use crate::population::Population;
use nomads_data::{Nomad, Position, TerrainLayout, Tile};
use rand::seq::SliceRandom;
use rand::Rng;

/// Procedural terrain. Each cell rolls for water, then every rolled cell
/// floods its eight neighbours into a small lake.
pub fn generate_terrain<R: Rng>(config: &WorldConfig, rng: &mut R) -> SimResult<Grid> {
    let mut grid = Grid::new(config.width, config.height);
    let springs: Vec<Position> = grid
        .positions()
        .filter(|_| rng.gen_bool(config.water_density))
        .collect();

    for spring in springs {
        grid.set_tile(spring, Tile::Water)?;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(p) = spring.offset(dx, dy).filter(|p| grid.is_in_bounds(*p)) {
                    grid.set_tile(p, Tile::Water)?;
                }
            }
        }
    }
    Ok(grid)
}

/// Terrain from a map file. The layout must match the configured dimensions.
pub fn terrain_from_layout(config: &WorldConfig, layout: &TerrainLayout) -> SimResult<Grid> {
    if layout.width != config.width || layout.height != config.height {
        return Err(SimError::LayoutMismatch {
            width: config.width,
            height: config.height,
            actual_width: layout.width,
            actual_height: layout.height,
            cells: layout.water.len(),
        });
    }
    Grid::from_layout(layout)
}

/// Scatters plants over the open cells. Returns how many were placed.
pub fn seed_vegetation<R: Rng>(grid: &mut Grid, density: f64, rng: &mut R) -> SimResult<usize> {
    let open: Vec<Position> = grid.positions().filter(|p| grid.is_open(*p)).collect();
    let mut planted = 0;
    for p in open {
        if rng.gen_bool(density) {
            grid.set_tile(p, Tile::Vegetation)?;
            planted += 1;
        }
    }
    Ok(planted)
}

/// Places `initial_count` founders on distinct random open cells.
pub fn seed_nomads<R: Rng>(
    grid: &mut Grid,
    config: &NomadConfig,
    rng: &mut R,
) -> SimResult<Population> {
    let open: Vec<Position> = grid.positions().filter(|p| grid.is_open(*p)).collect();
    if open.len() < config.initial_count {
        tracing::warn!(
            requested = config.initial_count,
            available = open.len(),
            "Not enough open cells for every founder"
        );
    }
    let cells: Vec<Position> = open
        .choose_multiple(rng, config.initial_count)
        .copied()
        .collect();

    let mut population = Population::new(Vec::new(), grid);
    for cell in cells {
        let nomad = Nomad::spawn(cell, 0, Lineage::founder(config), config, rng);
        population.add(nomad, grid)?;
    }
    Ok(population)
}
