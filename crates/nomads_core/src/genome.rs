use nomads_data::{Genome, GenomeTrait, MAX_LOYALTY, MIN_LOYALTY};
use rand::Rng;

/// Blends one trait of two parents.
///
/// The child starts at the integer mean. With probability `mutation_chance`
/// it is redrawn uniformly from `mean ± spread`, where `spread` is the parents'
/// difference (at least 1).
pub fn blend<R: Rng>(mother: i32, father: i32, mutation_chance: f64, rng: &mut R) -> i32 {
    let spread = (mother - father).abs().max(1);
    let base = (mother + father) / 2;
    if rng.gen_bool(mutation_chance) {
        rng.gen_range(base - spread..=base + spread)
    } else {
        base
    }
}

pub trait GenomeLogic {
    /// Offspring genome from two parents, clamped into legal trait ranges.
    fn crossover<R: Rng>(&self, father: &Genome, mutation_chance: f64, rng: &mut R) -> Genome;
}

impl GenomeLogic for Genome {
    fn crossover<R: Rng>(&self, father: &Genome, mutation_chance: f64, rng: &mut R) -> Genome {
        let mut child = [0; 3];
        for (slot, kind) in child.iter_mut().zip(GenomeTrait::ALL) {
            *slot = blend(self.get(kind), father.get(kind), mutation_chance, rng);
        }
        Genome {
            sense: child[0].max(1),
            stamina: child[1].max(1),
            tribal_loyalty: child[2].clamp(MIN_LOYALTY, MAX_LOYALTY),
        }
    }
}
