//! Character creation operation errors.

use sheetsmith_domain::{Ability, AbilityMethod, BudgetError, DomainError};

use crate::stores::StoreError;

/// Errors that can occur during guarded creation operations.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("Budget exceeded: {0}")]
    Budget(#[from] BudgetError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Step incomplete: {0}")]
    Step(#[from] DomainError),

    #[error("Ability method {0} does not roll dice")]
    NotRollable(AbilityMethod),

    #[error("{ability} is not a bonus option for {offered_by}")]
    BonusNotOffered { ability: Ability, offered_by: String },

    #[error("Class {class_id} has no melee ability choice for {ability}")]
    MeleeChoiceNotOffered { class_id: String, ability: Ability },

    #[error("No relationship with icon {0}")]
    NoRelationship(String),
}
