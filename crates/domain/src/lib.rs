//! Sheetsmith domain: 13th Age character data and rules
//!
//! No I/O and no randomness of its own; dice come in through
//! [`value_objects::RandomPort`].

pub mod aggregates;
pub mod creation;
pub mod entities;
pub mod error;
pub mod events;
pub mod rules;
pub mod value_objects;

pub use aggregates::{AbilityMethod, Character, SelectionKind};
pub use creation::{first_invalid_step, validate_step, CreationStep};
pub use entities::{ArmorClassTable, AttackAbility, AttackProfile, ClassDefinition, RaceDefinition};
pub use error::DomainError;
pub use events::{IconRelationshipChange, StepCompletion, ToggleOutcome};
pub use rules::{BudgetError, DerivedStats};
pub use value_objects::{
    Ability, AbilityScores, ArmorKind, Background, DiceParseError, Die, Equipment,
    IconRelationship, RandomPort, RelationshipType,
};
