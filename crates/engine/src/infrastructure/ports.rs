//! Port traits for rule content the engine does not own.
//!
//! Class and race definitions are loaded elsewhere; the engine only asks for
//! an already-resolved definition by id.

use sheetsmith_domain::{ClassDefinition, RaceDefinition};

#[cfg_attr(test, mockall::automock)]
pub trait ClassSource {
    fn class_definition(&self, class_id: &str) -> Option<ClassDefinition>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RaceSource {
    fn race_definition(&self, race_id: &str) -> Option<RaceDefinition>;
}
