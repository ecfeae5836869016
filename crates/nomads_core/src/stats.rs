use nomads_data::{Nomad, PopulationStats};

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

/// Builds the summary record for one step. Means of an empty population are 0.
#[must_use]
pub fn summarize(
    time: u64,
    world_area: usize,
    vegetation_count: usize,
    nomads: &[Nomad],
) -> PopulationStats {
    let n = nomads.len();
    PopulationStats {
        time,
        world_area,
        vegetation_count,
        population: n,
        female_population: nomads.iter().filter(|a| a.sex.is_female()).count(),
        mean_sense: mean(nomads.iter().map(|a| f64::from(a.genome.sense)), n),
        mean_stamina: mean(nomads.iter().map(|a| f64::from(a.genome.stamina)), n),
        mean_allegiance: mean(nomads.iter().map(|a| f64::from(a.allegiance)), n),
        mean_tribal_loyalty: mean(
            nomads.iter().map(|a| f64::from(a.genome.tribal_loyalty)),
            n,
        ),
    }
}
