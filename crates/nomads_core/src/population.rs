//! The live population and its per-step reconciliation with the grid.

use crate::config::{AppConfig, RemovalPolicy, VegetationConfig};
use crate::error::SimResult;
use crate::grid::Grid;
use crate::nomad::{Lineage, NomadLogic, Roster, TickContext};
use nomads_data::{DeathCause, Nomad, NomadId, Position, TribeId};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// A child delivered during a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Birth {
    pub id: NomadId,
    pub mother: NomadId,
    pub father: NomadId,
    pub position: Position,
    pub tribe: Option<TribeId>,
    pub generation: u32,
}

/// A nomad taken off the board during a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Death {
    pub id: NomadId,
    pub age: u64,
    pub position: Position,
    pub cause: DeathCause,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub births: Vec<Birth>,
    pub deaths: Vec<Death>,
    /// Deaths reported but left standing under [`RemovalPolicy::SinglePerStep`].
    pub deferred_deaths: usize,
}

/// Everyone except the nomad currently ticking.
struct Peers<'a> {
    before: &'a [Nomad],
    after: &'a [Nomad],
    index: &'a HashMap<NomadId, usize>,
    current: usize,
}

impl Roster for Peers<'_> {
    fn lookup(&self, id: NomadId) -> Option<&Nomad> {
        let &i = self.index.get(&id)?;
        match i.cmp(&self.current) {
            std::cmp::Ordering::Less => self.before.get(i),
            std::cmp::Ordering::Greater => self.after.get(i - self.current - 1),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Owns the live nomads. The grid stays the single authority on occupancy;
/// this list only tracks nomads, in the order they tick.
#[derive(Debug, Clone, Default)]
pub struct Population {
    nomads: Vec<Nomad>,
    index: HashMap<NomadId, usize>,
    vegetation_count: usize,
}

impl Population {
    /// Wraps nomads that are already placed on `grid`.
    #[must_use]
    pub fn new(nomads: Vec<Nomad>, grid: &Grid) -> Self {
        let mut population = Self {
            nomads,
            index: HashMap::new(),
            vegetation_count: grid.vegetation_count(),
        };
        population.reindex();
        population
    }

    fn reindex(&mut self) {
        self.index = self
            .nomads
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();
    }

    /// Places a nomad on the grid and appends it to the tick order.
    pub fn add(&mut self, nomad: Nomad, grid: &mut Grid) -> SimResult<()> {
        grid.place(nomad.position, nomad.id)?;
        self.index.insert(nomad.id, self.nomads.len());
        self.nomads.push(nomad);
        Ok(())
    }

    #[must_use]
    pub fn nomads(&self) -> &[Nomad] {
        &self.nomads
    }

    #[must_use]
    pub fn get(&self, id: NomadId) -> Option<&Nomad> {
        self.index.get(&id).and_then(|&i| self.nomads.get(i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nomads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nomads.is_empty()
    }

    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.is_empty()
    }

    /// Plant count as of the last regrowth check.
    #[must_use]
    pub fn vegetation_count(&self) -> usize {
        self.vegetation_count
    }

    /// Ticks every nomad alive at the start of the step, in list order.
    ///
    /// Interactions land on their targets before the next nomad ticks.
    /// Newborns are placed at once but first tick next step.
    pub fn step<R: Rng>(
        &mut self,
        grid: &mut Grid,
        time: u64,
        config: &AppConfig,
        rng: &mut R,
    ) -> SimResult<StepOutcome> {
        let policy = config.nomads.removal_policy;
        let start_len = self.nomads.len();
        let mut outcome = StepOutcome::default();
        let mut removed: HashSet<NomadId> = HashSet::new();

        for i in 0..start_len {
            let tick = {
                let (before, rest) = self.nomads.split_at_mut(i);
                let Some((current, after)) = rest.split_first_mut() else {
                    break;
                };
                let peers = Peers {
                    before,
                    after,
                    index: &self.index,
                    current: i,
                };
                let mut ctx = TickContext {
                    grid: &mut *grid,
                    time,
                    config,
                    rng: &mut *rng,
                };
                current.tick(&mut ctx, &peers)?
            };

            for interaction in &tick.interactions {
                if let Some(&j) = self.index.get(&interaction.target()) {
                    interaction.apply(&mut self.nomads[j]);
                }
            }

            if let Some((cell, pending)) = tick.offspring {
                let mother = &self.nomads[i];
                let lineage = Lineage::child_of(mother, &pending);
                let mother_id = mother.id;
                let child = Nomad::spawn(cell, time, lineage, &config.nomads, rng);
                tracing::debug!(id = %child.id, mother = %mother_id, position = %cell, "Birth");
                outcome.births.push(Birth {
                    id: child.id,
                    mother: mother_id,
                    father: pending.father,
                    position: cell,
                    tribe: child.tribe,
                    generation: child.generation,
                });
                self.add(child, grid)?;
            }

            if let Some(cause) = tick.death {
                let take = match policy {
                    RemovalPolicy::All => true,
                    RemovalPolicy::SinglePerStep => removed.is_empty(),
                };
                if take {
                    let dead = &self.nomads[i];
                    grid.vacate(dead.position);
                    removed.insert(dead.id);
                    tracing::debug!(id = %dead.id, %cause, "Death");
                    outcome.deaths.push(Death {
                        id: dead.id,
                        age: dead.age(time),
                        position: dead.position,
                        cause,
                    });
                } else {
                    outcome.deferred_deaths += 1;
                }
            }
        }

        if !removed.is_empty() {
            self.nomads.retain(|n| !removed.contains(&n.id));
            self.reindex();
        }
        Ok(outcome)
    }

    /// Every `growth_interval` ticks, grows plants if the cached vegetation
    /// fraction is under the cap, then refreshes the cache. Returns plants grown.
    pub fn regrow<R: Rng>(
        &mut self,
        grid: &mut Grid,
        time: u64,
        config: &VegetationConfig,
        rng: &mut R,
    ) -> usize {
        if time % config.growth_interval != 0 {
            return 0;
        }
        let grown = grid.grow_vegetation(
            self.vegetation_count,
            config.growth_amount,
            config.max_fraction,
            rng,
        );
        self.vegetation_count = grid.vegetation_count();
        grown
    }
}
