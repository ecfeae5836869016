use serde::{Deserialize, Serialize};

/// Lowest tribal loyalty (and offspring allegiance) a genome may carry.
pub const MIN_LOYALTY: i32 = 1;
/// Highest tribal loyalty, also the allegiance ceiling.
pub const MAX_LOYALTY: i32 = 10;

/// The inheritable trait set of a nomad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    /// Radius, in grid steps, within which the goal's resource is detected.
    pub sense: i32,
    /// Thirst/hunger threshold beyond which the nomad dies.
    pub stamina: i32,
    /// Resistance to rebellion, `1..=10`.
    pub tribal_loyalty: i32,
}

impl Genome {
    #[must_use]
    pub const fn new(sense: i32, stamina: i32, tribal_loyalty: i32) -> Self {
        Self {
            sense,
            stamina,
            tribal_loyalty,
        }
    }

    #[must_use]
    pub fn get(&self, trait_kind: GenomeTrait) -> i32 {
        match trait_kind {
            GenomeTrait::Sense => self.sense,
            GenomeTrait::Stamina => self.stamina,
            GenomeTrait::TribalLoyalty => self.tribal_loyalty,
        }
    }

    /// Whether every trait lies in its legal range.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        self.sense >= 1
            && self.stamina >= 1
            && (MIN_LOYALTY..=MAX_LOYALTY).contains(&self.tribal_loyalty)
    }
}

/// Selector for a single heritable trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenomeTrait {
    Sense,
    Stamina,
    TribalLoyalty,
}

impl GenomeTrait {
    pub const ALL: [GenomeTrait; 3] = [
        GenomeTrait::Sense,
        GenomeTrait::Stamina,
        GenomeTrait::TribalLoyalty,
    ];
}
