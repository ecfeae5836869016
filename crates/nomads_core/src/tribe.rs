//! Tribal membership rules: mating-time resolution, rebellion and rivalry.

use nomads_data::TribeId;
use rand::seq::SliceRandom;
use rand::Rng;

/// A nomad's tribal membership and its allegiance to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Standing {
    pub tribe: Option<TribeId>,
    pub allegiance: i32,
}

impl Standing {
    #[must_use]
    pub const fn new(tribe: Option<TribeId>, allegiance: i32) -> Self {
        Self { tribe, allegiance }
    }

    fn join(tribe: TribeId) -> Self {
        Self::new(Some(tribe), 1)
    }

    /// One step stronger. Unbounded: past 10 a nomad stops harassing rivals.
    fn strengthen(self) -> Self {
        Self::new(self.tribe, self.allegiance + 1)
    }

    /// One step weaker. Hitting zero expels.
    fn weaken(self) -> Self {
        let allegiance = self.allegiance - 1;
        if allegiance <= 0 {
            Self::new(None, 0)
        } else {
            Self::new(self.tribe, allegiance)
        }
    }
}

/// Resolves the tribes of a mating pair. Returns `(mother, father)`.
///
/// - Neither in a tribe: both found one together.
/// - One in a tribe: the other joins.
/// - Same tribe: both grow closer to it.
/// - Rival tribes: both drift away from their own.
pub fn resolve_mating<R: Rng>(mother: Standing, father: Standing, rng: &mut R) -> (Standing, Standing) {
    match (mother.tribe, father.tribe) {
        (None, None) => {
            let tribe = random_tribe(rng);
            (Standing::join(tribe), Standing::join(tribe))
        }
        (None, Some(t)) => (Standing::join(t), father),
        (Some(t), None) => (mother, Standing::join(t)),
        (Some(a), Some(b)) if a == b => (mother.strengthen(), father.strengthen()),
        (Some(_), Some(_)) => (mother.weaken(), father.weaken()),
    }
}

#[must_use]
pub fn random_tribe<R: Rng>(rng: &mut R) -> TribeId {
    TribeId::ALL.choose(rng).copied().unwrap_or(TribeId::Red)
}

/// Rolls for rebellion. On success returns a tribe different from `current`.
///
/// The odds are `(11 - tribal_loyalty) / denominator`, so the most loyal
/// genomes still rebel occasionally.
pub fn roll_rebellion<R: Rng>(
    current: TribeId,
    tribal_loyalty: i32,
    denominator: u32,
    rng: &mut R,
) -> Option<TribeId> {
    let threshold = i64::from(11 - tribal_loyalty);
    let roll = i64::from(rng.gen_range(1..=denominator.max(1)));
    if roll > threshold {
        return None;
    }
    let others: Vec<TribeId> = TribeId::ALL.into_iter().filter(|t| *t != current).collect();
    others.choose(rng).copied()
}

/// Whether `other` counts as a rival of `own`. Untribed nomads are rivals too.
#[must_use]
pub fn is_rival(own: TribeId, other: Option<TribeId>) -> bool {
    other != Some(own)
}
