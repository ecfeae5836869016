use crate::data::genome::Genome;
use crate::data::terrain::{Position, Tile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a nomad, unique for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NomadId(pub Uuid);

impl std::fmt::Display for NomadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.0.to_string();
        write!(f, "{}", &s[..8])
    }
}

/// The fixed tribe palette. Tribes carry no state; they are grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TribeId {
    Red,
    Cyan,
    Magenta,
    Yellow,
}

impl TribeId {
    pub const ALL: [TribeId; 4] = [
        TribeId::Red,
        TribeId::Cyan,
        TribeId::Magenta,
        TribeId::Yellow,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TribeId::Red => "red",
            TribeId::Cyan => "cyan",
            TribeId::Magenta => "magenta",
            TribeId::Yellow => "yellow",
        }
    }
}

/// What a nomad is currently foraging for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Goal {
    Eat,
    #[default]
    Drink,
}

impl Goal {
    /// The terrain tile that satisfies this goal.
    #[must_use]
    pub fn resource(self) -> Tile {
        match self {
            Goal::Eat => Tile::Vegetation,
            Goal::Drink => Tile::Water,
        }
    }
}

/// Genome and tribal inheritance carried by a pregnant female until birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOffspring {
    pub genome: Genome,
    pub tribe: Option<TribeId>,
    /// Starting allegiance of the child, `1..=10`.
    pub allegiance: i32,
    pub father: NomadId,
}

/// Female reproductive cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReproductiveState {
    /// Willing to mate when an adult male is adjacent.
    Receptive,
    /// Carrying offspring; birth is attempted once `gestation_remaining` hits 0.
    Pregnant {
        gestation_remaining: u32,
        pending: PendingOffspring,
    },
    /// Post-birth refractory period.
    Cooldown { remaining: u32 },
}

/// Female-only fields live inside the `Female` variant so males cannot touch them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female {
        state: ReproductiveState,
        /// Probability of conceiving when a mate is adjacent. Decays per birth.
        reproduction_chance: f64,
    },
}

impl Sex {
    #[must_use]
    pub fn female(reproduction_chance: f64) -> Self {
        Sex::Female {
            state: ReproductiveState::Receptive,
            reproduction_chance,
        }
    }

    #[must_use]
    pub fn is_female(&self) -> bool {
        matches!(self, Sex::Female { .. })
    }

    #[must_use]
    pub fn is_pregnant(&self) -> bool {
        matches!(
            self,
            Sex::Female {
                state: ReproductiveState::Pregnant { .. },
                ..
            }
        )
    }
}

/// Why a nomad died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    Thirst,
    Hunger,
    OldAge,
    Overcrowding,
}

impl std::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeathCause::Thirst => write!(f, "thirst"),
            DeathCause::Hunger => write!(f, "hunger"),
            DeathCause::OldAge => write!(f, "old age"),
            DeathCause::Overcrowding => write!(f, "overcrowding"),
        }
    }
}

/// A single nomad. Holds only its coordinates; the grid owns occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nomad {
    pub id: NomadId,
    pub position: Position,
    pub birth_time: u64,
    /// Age at which the nomad becomes an adult.
    pub adult_age: u64,
    pub adult: bool,
    pub genome: Genome,
    pub sex: Sex,
    pub thirst: u32,
    pub hunger: u32,
    pub lifespan: u64,
    pub tribe: Option<TribeId>,
    pub allegiance: i32,
    pub goal: Goal,
    pub target: Option<Position>,
    pub generation: u32,
}

impl Nomad {
    #[must_use]
    pub fn age(&self, time: u64) -> u64 {
        time.saturating_sub(self.birth_time)
    }

    #[must_use]
    pub fn is_adult_male(&self) -> bool {
        self.adult && !self.sex.is_female()
    }

    /// Single-character marker: `m`/`f` for juveniles, `M`/`F` for adults,
    /// `P` for pregnant females.
    #[must_use]
    pub fn marker(&self) -> char {
        match (&self.sex, self.adult) {
            (Sex::Male, false) => 'm',
            (Sex::Male, true) => 'M',
            (sex, _) if sex.is_pregnant() => 'P',
            (_, false) => 'f',
            (_, true) => 'F',
        }
    }

    /// Compact one-line state dump.
    #[must_use]
    pub fn debug_line(&self) -> String {
        format!(
            "Nomad {} POS: {}, THR: {}, HGR: {}, GOL: {:?}, TGT: {}, SNS: {}, STM: {}, LSP: {}, TRB: {}, ALG: {}",
            self.id,
            self.position,
            self.thirst,
            self.hunger,
            self.goal,
            self.target
                .map_or_else(|| "none".to_string(), |t| t.to_string()),
            self.genome.sense,
            self.genome.stamina,
            self.lifespan,
            self.tribe.map_or("none", TribeId::name),
            self.allegiance
        )
    }
}
