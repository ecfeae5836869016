use serde::{Deserialize, Serialize};

/// Per-step summary record handed to telemetry and the UI.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PopulationStats {
    pub time: u64,
    pub world_area: usize,
    pub vegetation_count: usize,
    pub population: usize,
    pub female_population: usize,
    pub mean_sense: f64,
    pub mean_stamina: f64,
    pub mean_allegiance: f64,
    pub mean_tribal_loyalty: f64,
}

impl PopulationStats {
    /// Share of the population that is female, 0 for an empty population.
    #[must_use]
    pub fn female_ratio(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            self.female_population as f64 / self.population as f64
        }
    }

    #[must_use]
    pub fn vegetation_fraction(&self) -> f64 {
        if self.world_area == 0 {
            0.0
        } else {
            self.vegetation_count as f64 / self.world_area as f64
        }
    }
}
