//! Race, class, bonus choices and free-text details.

use sheetsmith_domain::rules::validate_ability_bonuses;
use sheetsmith_domain::{Ability, AttackAbility, ClassDefinition, Equipment, RaceDefinition};

use super::CreationError;
use crate::stores::CharacterStore;

/// Picks a race. A race offering one bonus ability gets it automatically;
/// reselecting the current race keeps the existing bonus choice.
pub fn select_race(store: &mut CharacterStore, race: &RaceDefinition) {
    let current = store.get();
    let bonus = race.sole_bonus().or_else(|| {
        if current.race.as_deref() == Some(race.id.as_str()) {
            current.racial_ability_bonus
        } else {
            None
        }
    });
    tracing::debug!(race = %race.id, ?bonus, "Selected race");
    store.update(|c| {
        c.race = Some(race.id.clone());
        c.racial_ability_bonus = bonus;
    });
}

/// Picks a class, with the same bonus rules as [`select_race`]. Talents and
/// spells are always cleared; changing to a different class also clears
/// maneuvers and the melee choice.
pub fn select_class(store: &mut CharacterStore, class: &ClassDefinition) {
    let current = store.get();
    let same_class = current.class.as_deref() == Some(class.id.as_str());
    let bonus = class
        .sole_bonus()
        .or(if same_class { current.class_ability_bonus } else { None });
    tracing::debug!(class = %class.id, ?bonus, same_class, "Selected class");
    store.update(|c| {
        c.class = Some(class.id.clone());
        c.class_ability_bonus = bonus;
        c.selected_talents.clear();
        c.selected_spells.clear();
        if !same_class {
            c.selected_maneuvers.clear();
            c.melee_ability_choice = None;
        }
    });
}

pub fn choose_racial_bonus(
    store: &mut CharacterStore,
    race: &RaceDefinition,
    ability: Ability,
) -> Result<(), CreationError> {
    if !race.offers_bonus(ability) {
        return Err(CreationError::BonusNotOffered {
            ability,
            offered_by: race.id.clone(),
        });
    }
    validate_ability_bonuses(Some(ability), store.get().class_ability_bonus)?;
    store.update(|c| c.racial_ability_bonus = Some(ability));
    Ok(())
}

/// Rejects an ability the class does not offer or the racial bonus already uses.
pub fn choose_class_bonus(
    store: &mut CharacterStore,
    class: &ClassDefinition,
    ability: Ability,
) -> Result<(), CreationError> {
    if !class.offers_bonus(ability) {
        return Err(CreationError::BonusNotOffered {
            ability,
            offered_by: class.id.clone(),
        });
    }
    if let Err(err) = validate_ability_bonuses(store.get().racial_ability_bonus, Some(ability)) {
        tracing::warn!(%ability, "Class bonus matches racial bonus");
        return Err(err.into());
    }
    store.update(|c| c.class_ability_bonus = Some(ability));
    Ok(())
}

/// Sets or clears the melee ability for classes that let the player choose.
pub fn choose_melee_ability(
    store: &mut CharacterStore,
    class: &ClassDefinition,
    ability: Option<Ability>,
) -> Result<(), CreationError> {
    if let Some(ability) = ability {
        let offered = match class.melee_attack.as_ref().map(|m| m.ability) {
            Some(AttackAbility::StrOrDex) => {
                matches!(ability, Ability::Strength | Ability::Dexterity)
            }
            _ => false,
        } || class
            .recovery_die_alt
            .as_ref()
            .is_some_and(|alt| alt.contains_key(&ability));
        if !offered {
            return Err(CreationError::MeleeChoiceNotOffered {
                class_id: class.id.clone(),
                ability,
            });
        }
    }
    store.update(|c| c.melee_ability_choice = ability);
    Ok(())
}

pub fn set_name(store: &mut CharacterStore, name: &str) {
    tracing::debug!(name, "Set name");
    store.update(|c| c.name = name.to_string());
}

pub fn set_one_unique_thing(store: &mut CharacterStore, text: &str) {
    tracing::debug!(len = text.len(), "Set one unique thing");
    store.update(|c| c.one_unique_thing = text.to_string());
}

pub fn set_equipment(store: &mut CharacterStore, equipment: Equipment) {
    tracing::debug!(armor = %equipment.armor, shield = equipment.shield, "Set equipment");
    store.update(|c| c.equipment = equipment);
}
