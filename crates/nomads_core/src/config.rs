//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every option is static for the duration of a run.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 30
//! height = 10
//! water_density = 0.03
//! vegetation_density = 0.05
//! seed = 42
//!
//! [nomads]
//! initial_count = 40
//! mutation_chance = 0.9
//!
//! [vegetation]
//! growth_interval = 8
//! ```

use serde::{Deserialize, Serialize};

/// World dimensions and initial terrain densities.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
    /// Chance that a cell seeds a water body before blobbing.
    pub water_density: f64,
    /// Chance that a remaining open cell starts with vegetation.
    pub vegetation_density: f64,
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 10,
            water_density: 0.03,
            vegetation_density: 0.05,
            seed: None,
        }
    }
}

/// How deaths reported during a step are taken off the board.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Only the first death of each step is removed; the rest report again
    /// on their next tick.
    #[default]
    SinglePerStep,
    /// Every reported death is removed in the step it happens.
    All,
}

/// Nomad life-cycle and inheritance parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct NomadConfig {
    pub initial_count: usize,
    pub mutation_chance: f64,
    pub reproduction_chance: f64,
    pub reproduction_chance_decrease: f64,
    pub gestation: u32,
    /// Ticks a mother rests after giving birth. 0 returns her straight to receptive.
    pub cooldown_ticks: u32,
    pub base_sense: i32,
    pub base_stamina: i32,
    pub base_tribal_loyalty: i32,
    /// Upper bound of the per-tick thirst and hunger increase.
    pub fatigue: u32,
    pub base_lifespan: u64,
    pub lifespan_variance: u64,
    pub adult_age_min: u64,
    pub adult_age_max: u64,
    pub removal_policy: RemovalPolicy,
}

impl Default for NomadConfig {
    fn default() -> Self {
        Self {
            initial_count: 40,
            mutation_chance: 0.9,
            reproduction_chance: 0.5,
            reproduction_chance_decrease: 0.05,
            gestation: 30,
            cooldown_ticks: 0,
            base_sense: 4,
            base_stamina: 30,
            base_tribal_loyalty: 5,
            fatigue: 1,
            base_lifespan: 800,
            lifespan_variance: 100,
            adult_age_min: 40,
            adult_age_max: 60,
            removal_policy: RemovalPolicy::SinglePerStep,
        }
    }
}

/// Tribal dynamics.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TribeConfig {
    /// Rebellion fires when a roll in `1..=rebellion_denominator` is at most
    /// `11 - tribal_loyalty`.
    pub rebellion_denominator: u32,
    /// Hunger inflicted on a rival neighbour by a fully loyal nomad.
    pub aggression_penalty: u32,
}

impl Default for TribeConfig {
    fn default() -> Self {
        Self {
            rebellion_denominator: 5000,
            aggression_penalty: 10,
        }
    }
}

/// Vegetation regrowth.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct VegetationConfig {
    pub growth_interval: u64,
    pub growth_amount: usize,
    pub max_fraction: f64,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self {
            growth_interval: 8,
            growth_amount: 10,
            max_fraction: 0.30,
        }
    }
}

/// Telemetry and pacing. None of these affect simulation outcomes.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub stats_interval: u64,
    pub tick_pacing_ms: u64,
    pub stats_file: String,
    pub log_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            stats_interval: 20,
            tick_pacing_ms: 150,
            stats_file: "stats.csv".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub nomads: NomadConfig,
    pub tribes: TribeConfig,
    pub vegetation: VegetationConfig,
    pub output: OutputConfig,
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            is_probability(self.world.water_density),
            "Water density must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.world.vegetation_density),
            "Vegetation density must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            is_probability(self.nomads.mutation_chance),
            "Mutation chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.nomads.reproduction_chance),
            "Reproduction chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.nomads.reproduction_chance_decrease),
            "Reproduction chance decrease must be in [0.0, 1.0]"
        );
        anyhow::ensure!(self.nomads.gestation > 0, "Gestation must be positive");
        anyhow::ensure!(self.nomads.base_sense >= 1, "Base sense must be at least 1");
        anyhow::ensure!(
            self.nomads.base_stamina >= 1,
            "Base stamina must be at least 1"
        );
        anyhow::ensure!(
            (1..=10).contains(&self.nomads.base_tribal_loyalty),
            "Base tribal loyalty must be in [1, 10]"
        );
        anyhow::ensure!(
            self.nomads.lifespan_variance <= self.nomads.base_lifespan,
            "Lifespan variance must not exceed base lifespan"
        );
        anyhow::ensure!(
            self.nomads.adult_age_min <= self.nomads.adult_age_max,
            "Adult age range is inverted"
        );

        anyhow::ensure!(
            self.tribes.rebellion_denominator > 0,
            "Rebellion denominator must be positive"
        );

        anyhow::ensure!(
            self.vegetation.growth_interval > 0,
            "Vegetation growth interval must be positive"
        );
        anyhow::ensure!(
            is_probability(self.vegetation.max_fraction),
            "Max vegetation fraction must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.output.stats_interval > 0,
            "Stats interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of cells.
    #[must_use]
    pub fn world_area(&self) -> usize {
        self.world.width as usize * self.world.height as usize
    }

    /// Hash of the rule sections, ignoring seed and output settings. Two runs
    /// with the same fingerprint play by the same rules.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{}x{}", self.world.width, self.world.height).as_bytes());
        hasher.update(format!("{:?}", self.nomads).as_bytes());
        hasher.update(format!("{:?}", self.tribes).as_bytes());
        hasher.update(format!("{:?}", self.vegetation).as_bytes());
        hex::encode(hasher.finalize())
    }
}
