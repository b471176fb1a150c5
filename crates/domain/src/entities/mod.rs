//! Rule content entities supplied by the data-loading layer

mod class_definition;
mod race_definition;

pub use class_definition::{
    ArmorClassTable, AttackAbility, AttackProfile, ClassDefinition, DEFAULT_TALENT_COUNT,
};
pub use race_definition::RaceDefinition;
