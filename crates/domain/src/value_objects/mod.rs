//! Value objects - Immutable objects defined by their attributes

mod ability;
mod allocation;
mod dice;
mod equipment;

pub use ability::{Ability, AbilityScores};

// Backgrounds and icon relationships share the budget rules in `rules::budget`
pub use allocation::{Background, IconRelationship, RelationshipType};

pub use dice::{DiceParseError, Die, RandomPort, DEFAULT_RECOVERY_DIE};
pub use equipment::{ArmorKind, Equipment};
