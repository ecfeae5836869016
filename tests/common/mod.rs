pub mod macros;

use nomads_core::config::AppConfig;
use nomads_core::grid::Grid;
use nomads_core::nomad::fixed_id;
use nomads_core::population::Population;
use nomads_core::simulation::Simulation;
use nomads_data::{Genome, Goal, Nomad, Position, Sex, Tile};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A hand-placed adult with the base genome and no tribe.
#[allow(dead_code)]
pub fn nomad(n: u128, x: u16, y: u16, sex: Sex) -> Nomad {
    Nomad {
        id: fixed_id(n),
        position: Position::new(x, y),
        birth_time: 0,
        adult_age: 40,
        adult: true,
        genome: Genome::new(4, 30, 5),
        sex,
        thirst: 0,
        hunger: 0,
        lifespan: 800,
        tribe: None,
        allegiance: 0,
        goal: Goal::Drink,
        target: None,
        generation: 0,
    }
}

/// Builds a simulation from a hand-made world instead of generated terrain.
#[allow(dead_code)]
pub struct SimBuilder {
    config: AppConfig,
    width: u16,
    height: u16,
    tiles: Vec<(Position, Tile)>,
    nomads: Vec<Nomad>,
    seed: u64,
}

#[allow(dead_code)]
impl SimBuilder {
    pub fn new(width: u16, height: u16) -> Self {
        let mut config = AppConfig::default();
        config.world.width = width;
        config.world.height = height;
        config.nomads.fatigue = 0;
        config.tribes.rebellion_denominator = u32::MAX;
        Self {
            config,
            width,
            height,
            tiles: Vec::new(),
            nomads: Vec::new(),
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_water(mut self, x: u16, y: u16) -> Self {
        self.tiles.push((Position::new(x, y), Tile::Water));
        self
    }

    pub fn with_vegetation(mut self, x: u16, y: u16) -> Self {
        self.tiles.push((Position::new(x, y), Tile::Vegetation));
        self
    }

    pub fn with_nomad(mut self, nomad: Nomad) -> Self {
        self.nomads.push(nomad);
        self
    }

    pub fn build(self) -> Simulation {
        let mut grid = Grid::new(self.width, self.height);
        for (pos, tile) in self.tiles {
            grid.set_tile(pos, tile).expect("tile in bounds");
        }
        let mut population = Population::new(Vec::new(), &grid);
        for nomad in self.nomads {
            population.add(nomad, &mut grid).expect("free cell");
        }
        Simulation::from_parts(
            self.config,
            grid,
            population,
            ChaCha8Rng::seed_from_u64(self.seed),
        )
    }
}

/// A generated world with a fixed seed.
#[allow(dead_code)]
pub fn seeded(seed: u64) -> Simulation {
    let mut config = AppConfig::default();
    config.world.seed = Some(seed);
    Simulation::new(config).expect("default config is valid")
}

/// Grid occupancy and nomad positions describe the same set.
#[allow(dead_code)]
pub fn assert_occupancy_consistent(sim: &Simulation) {
    let grid = sim.grid();
    let nomads = sim.population().nomads();
    assert_eq!(grid.occupied_count(), nomads.len(), "occupancy count mismatch");
    for n in nomads {
        assert!(grid.is_in_bounds(n.position), "{} out of bounds", n.id);
        assert_eq!(
            grid.occupant_at(n.position),
            Some(n.id),
            "grid disagrees about {} at {}",
            n.id,
            n.position
        );
        assert_eq!(grid.tile_at(n.position), Tile::Open);
    }
}
