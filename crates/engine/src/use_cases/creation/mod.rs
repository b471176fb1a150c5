//! Character creation use cases.
//!
//! Each operation checks the relevant budget or precondition against the
//! current snapshot before touching the store, so a rejected action leaves
//! the character unchanged.

mod abilities;
mod allocations;
mod error;
mod identity;

pub use abilities::{adjust_point_buy, roll_abilities, set_ability_method, set_rolled_score};
pub use allocations::{
    adjust_background_points, adjust_icon_points, choose_icon_relationship, rename_background,
    toggle_talent_for_class,
};
pub use error::CreationError;
pub use identity::{
    choose_class_bonus, choose_melee_ability, choose_racial_bonus, select_class, select_race,
    set_equipment, set_name, set_one_unique_thing,
};

use sheetsmith_domain::{validate_step, CreationStep, StepCompletion};

use crate::stores::CharacterStore;

/// Validates `step` against the current character, then marks it completed.
pub fn complete_step(
    store: &mut CharacterStore,
    step: CreationStep,
) -> Result<StepCompletion, CreationError> {
    if let Err(err) = validate_step(step, &store.get()) {
        tracing::warn!(step = step.number(), error = %err, "Step not complete");
        return Err(err.into());
    }
    Ok(store.mark_step_completed(step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsmith_domain::{Ability, ClassDefinition, RaceDefinition, RelationshipType};

    #[test]
    fn complete_step_validates_first() {
        let mut store = CharacterStore::new();
        assert!(matches!(
            complete_step(&mut store, CreationStep::Race),
            Err(CreationError::Step(_))
        ));
        assert!(store.get().completed_steps.is_empty());

        select_race(&mut store, &RaceDefinition::new("halfling", [Ability::Dexterity]));
        assert_eq!(
            complete_step(&mut store, CreationStep::Race).unwrap(),
            StepCompletion::Marked
        );
        assert_eq!(
            complete_step(&mut store, CreationStep::Race).unwrap(),
            StepCompletion::AlreadyCompleted
        );
    }

    #[test]
    fn walk_through_creation() {
        let mut store = CharacterStore::new();
        let elf = RaceDefinition::new("high-elf", [Ability::Intelligence, Ability::Charisma]);
        let wizard = ClassDefinition::new("wizard", 6, 10, 10, 12)
            .with_ability_bonus([Ability::Intelligence, Ability::Wisdom]);

        select_race(&mut store, &elf);
        choose_racial_bonus(&mut store, &elf, Ability::Charisma).unwrap();
        select_class(&mut store, &wizard);
        choose_class_bonus(&mut store, &wizard, Ability::Intelligence).unwrap();
        adjust_point_buy(&mut store, Ability::Intelligence, 4).unwrap();
        adjust_background_points(&mut store, 0, 4).unwrap();
        rename_background(&mut store, 0, "Apprentice of the Archmage").unwrap();
        choose_icon_relationship(&mut store, "archmage", RelationshipType::Positive).unwrap();
        set_name(&mut store, "Aelar");

        for step in CreationStep::ALL {
            complete_step(&mut store, step).unwrap();
        }
        assert_eq!(store.get().completed_steps, (1..=9).collect::<Vec<u8>>());
        assert!(sheetsmith_domain::first_invalid_step(&store.get()).is_none());
    }
}
