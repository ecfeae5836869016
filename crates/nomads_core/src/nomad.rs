//! Per-tick behaviour of a single nomad.
//!
//! A tick runs maturation, reproduction, movement, rebellion, aggression,
//! metabolism and the death check, in that order. The nomad mutates itself
//! and the grid directly; effects on other nomads are returned as
//! [`Interaction`]s for the population to apply before the next nomad ticks.

use crate::config::{AppConfig, NomadConfig};
use crate::error::{SimError, SimResult};
use crate::genome::GenomeLogic;
use crate::grid::{Grid, NeighborContent};
use crate::tribe::{self, Standing};
use nomads_data::{
    DeathCause, Genome, Goal, Nomad, NomadId, PendingOffspring, Position, ReproductiveState, Sex,
    MAX_LOYALTY,
};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Everything a tick may read or mutate besides the nomad itself.
pub struct TickContext<'a, R: Rng> {
    pub grid: &'a mut Grid,
    pub time: u64,
    pub config: &'a AppConfig,
    pub rng: &'a mut R,
}

/// Read access to the other nomads, keyed by the ids the grid hands out.
pub trait Roster {
    fn lookup(&self, id: NomadId) -> Option<&Nomad>;
}

impl Roster for [Nomad] {
    fn lookup(&self, id: NomadId) -> Option<&Nomad> {
        self.iter().find(|n| n.id == id)
    }
}

/// A change a ticking nomad imposes on a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Tribal resolution changed the mate's tribe or allegiance.
    Standing { id: NomadId, standing: Standing },
    /// A loyal nomad harassed a rival.
    Hunger { id: NomadId, amount: u32 },
}

impl Interaction {
    #[must_use]
    pub fn target(&self) -> NomadId {
        match self {
            Interaction::Standing { id, .. } | Interaction::Hunger { id, .. } => *id,
        }
    }

    pub fn apply(&self, nomad: &mut Nomad) {
        match *self {
            Interaction::Standing { standing, .. } => nomad.set_standing(standing),
            Interaction::Hunger { amount, .. } => {
                nomad.hunger = nomad.hunger.saturating_add(amount);
            }
        }
    }
}

/// What a tick reports back to the population.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub death: Option<DeathCause>,
    /// Birth cell and inheritance of a child delivered this tick.
    pub offspring: Option<(Position, PendingOffspring)>,
    pub interactions: Vec<Interaction>,
}

/// Identity-independent description of a new nomad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lineage {
    pub genome: Genome,
    pub standing: Standing,
    pub generation: u32,
}

impl Lineage {
    /// First-generation nomad with base traits and no tribe.
    #[must_use]
    pub fn founder(config: &NomadConfig) -> Self {
        Self {
            genome: Genome::new(
                config.base_sense,
                config.base_stamina,
                config.base_tribal_loyalty,
            ),
            standing: Standing::default(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn child_of(mother: &Nomad, pending: &PendingOffspring) -> Self {
        Self {
            genome: pending.genome,
            standing: Standing::new(pending.tribe, pending.allegiance),
            generation: mother.generation + 1,
        }
    }
}

pub trait NomadLogic {
    fn spawn<R: Rng>(
        position: Position,
        birth_time: u64,
        lineage: Lineage,
        config: &NomadConfig,
        rng: &mut R,
    ) -> Self
    where
        Self: Sized;
    fn standing(&self) -> Standing;
    fn set_standing(&mut self, standing: Standing);
    fn tick<R: Rng, P: Roster + ?Sized>(
        &mut self,
        ctx: &mut TickContext<'_, R>,
        peers: &P,
    ) -> SimResult<TickOutcome>;
}

impl NomadLogic for Nomad {
    fn spawn<R: Rng>(
        position: Position,
        birth_time: u64,
        lineage: Lineage,
        config: &NomadConfig,
        rng: &mut R,
    ) -> Self {
        let id = NomadId(uuid::Builder::from_random_bytes(rng.gen()).into_uuid());
        let allegiance = lineage.standing.allegiance.max(0);
        let base = config.base_lifespan + 10 * allegiance as u64;
        let lifespan = rng.gen_range(
            base.saturating_sub(config.lifespan_variance)..=base + config.lifespan_variance,
        );
        let adult_age = rng.gen_range(config.adult_age_min..=config.adult_age_max);
        let sex = if rng.gen_bool(0.5) {
            Sex::Male
        } else {
            Sex::female(config.reproduction_chance)
        };
        Nomad {
            id,
            position,
            birth_time,
            adult_age,
            adult: false,
            genome: lineage.genome,
            sex,
            thirst: 0,
            hunger: 0,
            lifespan,
            tribe: lineage.standing.tribe,
            allegiance,
            goal: Goal::Drink,
            target: None,
            generation: lineage.generation,
        }
    }

    fn standing(&self) -> Standing {
        Standing::new(self.tribe, self.allegiance)
    }

    fn set_standing(&mut self, standing: Standing) {
        self.tribe = standing.tribe;
        self.allegiance = standing.allegiance;
    }

    fn tick<R: Rng, P: Roster + ?Sized>(
        &mut self,
        ctx: &mut TickContext<'_, R>,
        peers: &P,
    ) -> SimResult<TickOutcome> {
        let mut outcome = TickOutcome::default();
        let age = self.age(ctx.time);
        if age == self.adult_age {
            self.adult = true;
        }

        if self.adult && self.sex.is_female() {
            reproduce(self, ctx, peers, &mut outcome)?;
        }

        let birth_cell = outcome.offspring.map(|(pos, _)| pos);
        forage(self, ctx, birth_cell)?;
        rebel(self, ctx);

        let neighbors = ctx.grid.neighbors4(self.position);
        if let Some(own) = self.tribe.filter(|_| self.allegiance == MAX_LOYALTY) {
            for (pos, content) in &neighbors {
                let NeighborContent::Occupied(id) = *content else {
                    continue;
                };
                let other = lookup(peers, id, *pos)?;
                if tribe::is_rival(own, other.tribe) {
                    outcome.interactions.push(Interaction::Hunger {
                        id,
                        amount: ctx.config.tribes.aggression_penalty,
                    });
                    break;
                }
            }
        }

        let fatigue = ctx.config.nomads.fatigue;
        self.thirst += ctx.rng.gen_range(0..=fatigue);
        self.hunger += ctx.rng.gen_range(0..=fatigue);

        let stamina = u32::try_from(self.genome.stamina).unwrap_or(0);
        let crowded = neighbors.len() == 4
            && neighbors
                .iter()
                .all(|(_, c)| matches!(c, NeighborContent::Occupied(_)));
        outcome.death = if self.thirst > stamina {
            Some(DeathCause::Thirst)
        } else if self.hunger > stamina {
            Some(DeathCause::Hunger)
        } else if age > self.lifespan {
            Some(DeathCause::OldAge)
        } else if crowded {
            Some(DeathCause::Overcrowding)
        } else {
            None
        };

        Ok(outcome)
    }
}

fn lookup<P: Roster + ?Sized>(peers: &P, id: NomadId, position: Position) -> SimResult<&Nomad> {
    peers
        .lookup(id)
        .ok_or(SimError::UnknownOccupant { id, position })
}

fn reproduce<R: Rng, P: Roster + ?Sized>(
    mother: &mut Nomad,
    ctx: &mut TickContext<'_, R>,
    peers: &P,
    outcome: &mut TickOutcome,
) -> SimResult<()> {
    let Sex::Female {
        state,
        mut reproduction_chance,
    } = mother.sex
    else {
        return Ok(());
    };
    let config = ctx.config;
    let cfg = &config.nomads;

    let mut state = match state {
        ReproductiveState::Receptive => {
            match conceive(mother, reproduction_chance, ctx, peers, outcome)? {
                Some(pending) => ReproductiveState::Pregnant {
                    gestation_remaining: cfg.gestation,
                    pending,
                },
                None => ReproductiveState::Receptive,
            }
        }
        ReproductiveState::Cooldown { remaining } if remaining > 1 => {
            ReproductiveState::Cooldown {
                remaining: remaining - 1,
            }
        }
        ReproductiveState::Cooldown { .. } => ReproductiveState::Receptive,
        pregnant => pregnant,
    };

    if let ReproductiveState::Pregnant {
        gestation_remaining,
        pending,
    } = state
    {
        if gestation_remaining > 0 {
            state = ReproductiveState::Pregnant {
                gestation_remaining: gestation_remaining - 1,
                pending,
            };
        } else if let Some((cell, _)) = ctx
            .grid
            .neighbors4(mother.position)
            .into_iter()
            .find(|(_, c)| *c == NeighborContent::Open)
        {
            outcome.offspring = Some((cell, pending));
            reproduction_chance =
                (reproduction_chance - cfg.reproduction_chance_decrease).max(0.0);
            state = if cfg.cooldown_ticks > 0 {
                ReproductiveState::Cooldown {
                    remaining: cfg.cooldown_ticks,
                }
            } else {
                ReproductiveState::Receptive
            };
        }
        // Boxed in: stay pregnant at zero and retry next tick.
    }

    mother.sex = Sex::Female {
        state,
        reproduction_chance,
    };
    Ok(())
}

/// Mates with the first adjacent adult male, if the mood strikes.
fn conceive<R: Rng, P: Roster + ?Sized>(
    mother: &mut Nomad,
    reproduction_chance: f64,
    ctx: &mut TickContext<'_, R>,
    peers: &P,
    outcome: &mut TickOutcome,
) -> SimResult<Option<PendingOffspring>> {
    if !ctx.rng.gen_bool(reproduction_chance.clamp(0.0, 1.0)) {
        return Ok(None);
    }

    let mut father = None;
    for (pos, content) in ctx.grid.neighbors4(mother.position) {
        if let NeighborContent::Occupied(id) = content {
            let candidate = lookup(peers, id, pos)?;
            if candidate.is_adult_male() {
                father = Some(candidate);
                break;
            }
        }
    }
    let Some(father) = father else {
        return Ok(None);
    };

    let before = father.standing();
    let (mine, his) = tribe::resolve_mating(mother.standing(), before, ctx.rng);
    mother.set_standing(mine);
    if his != before {
        outcome.interactions.push(Interaction::Standing {
            id: father.id,
            standing: his,
        });
    }

    let genome = mother
        .genome
        .crossover(&father.genome, ctx.config.nomads.mutation_chance, ctx.rng);
    tracing::trace!(mother = %mother.id, father = %father.id, "Conception");
    Ok(Some(PendingOffspring {
        genome,
        tribe: mother.tribe,
        allegiance: mother.allegiance.clamp(1, MAX_LOYALTY),
        father: father.id,
    }))
}

/// Moves toward, acts on, or looks for the current goal's resource.
///
/// `reserved` is a cell promised to a newborn this tick and is never entered.
fn forage<R: Rng>(
    nomad: &mut Nomad,
    ctx: &mut TickContext<'_, R>,
    reserved: Option<Position>,
) -> SimResult<()> {
    if let Some(target) = nomad.target {
        match nomad.position.manhattan(target) {
            0 => nomad.target = None,
            1 => {
                match nomad.goal {
                    Goal::Eat => {
                        ctx.grid.consume_vegetation(target);
                        nomad.hunger = 0;
                    }
                    Goal::Drink => nomad.thirst = 0,
                }
                nomad.target = None;
                nomad.goal = if nomad.hunger >= nomad.thirst {
                    Goal::Eat
                } else {
                    Goal::Drink
                };
            }
            _ => approach(nomad, target, ctx.grid, reserved)?,
        }
        return Ok(());
    }

    if let Some(found) = scan(nomad, ctx.grid) {
        nomad.target = Some(found);
        if nomad.position.manhattan(found) > 1 {
            approach(nomad, found, ctx.grid, reserved)?;
        }
        return Ok(());
    }

    let mut directions = crate::grid::NEIGHBOR_OFFSETS;
    directions.shuffle(ctx.rng);
    for (dx, dy) in directions {
        if let Some(next) = nomad.position.offset(dx, dy) {
            if can_enter(ctx.grid, next, reserved) {
                step_to(nomad, next, ctx.grid)?;
                break;
            }
        }
    }
    Ok(())
}

/// Nearest goal tile along the four axes, checking +x, -x, +y, -y at each radius.
fn scan(nomad: &Nomad, grid: &Grid) -> Option<Position> {
    let resource = nomad.goal.resource();
    (1..=nomad.genome.sense).find_map(|r| {
        [(r, 0), (-r, 0), (0, r), (0, -r)]
            .into_iter()
            .filter_map(|(dx, dy)| nomad.position.offset(dx, dy))
            .find(|p| grid.is_in_bounds(*p) && grid.tile_at(*p) == resource)
    })
}

/// One step along the axis with more distance left; ties go along the column.
fn approach(
    nomad: &mut Nomad,
    target: Position,
    grid: &mut Grid,
    reserved: Option<Position>,
) -> SimResult<()> {
    let (dx, dy) = nomad.position.delta_to(target);
    let step = if dx.abs() > dy.abs() {
        (dx.signum(), 0)
    } else {
        (0, dy.signum())
    };
    match nomad.position.offset(step.0, step.1) {
        Some(next) if can_enter(grid, next, reserved) => step_to(nomad, next, grid),
        _ => {
            nomad.target = None;
            Ok(())
        }
    }
}

fn can_enter(grid: &Grid, pos: Position, reserved: Option<Position>) -> bool {
    grid.is_open(pos) && reserved != Some(pos)
}

fn step_to(nomad: &mut Nomad, next: Position, grid: &mut Grid) -> SimResult<()> {
    grid.move_agent(nomad.position, next)?;
    nomad.position = next;
    Ok(())
}

fn rebel<R: Rng>(nomad: &mut Nomad, ctx: &mut TickContext<'_, R>) {
    let Some(current) = nomad.tribe else {
        return;
    };
    if let Some(new_tribe) = tribe::roll_rebellion(
        current,
        nomad.genome.tribal_loyalty,
        ctx.config.tribes.rebellion_denominator,
        ctx.rng,
    ) {
        tracing::debug!(id = %nomad.id, from = current.name(), to = new_tribe.name(), "Rebellion");
        nomad.tribe = Some(new_tribe);
        nomad.allegiance = MAX_LOYALTY;
    }
}

/// Deterministic id for hand-built nomads.
#[must_use]
pub fn fixed_id(n: u128) -> NomadId {
    NomadId(Uuid::from_u128(n))
}
