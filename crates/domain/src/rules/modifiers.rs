//! Ability modifiers and racial/class bonuses

use crate::aggregates::Character;
use crate::value_objects::{Ability, AbilityScores};

/// Size of each racial or class ability bonus.
pub const ABILITY_BONUS: i32 = 2;

/// `floor((score - 10) / 2)` for any integer score.
pub fn modifier_of(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

/// Signed display form: `+0`, `+3`, `-2`.
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}

/// Base scores plus racial and class bonuses.
///
/// A bonus only applies to a key present in the mapping. Both bonuses stack
/// when they name the same ability; distinctness is checked upstream by
/// [`crate::rules::validate_ability_bonuses`].
pub fn effective_abilities(character: &Character) -> AbilityScores {
    let mut abilities = character.abilities.clone();
    for bonus in [character.racial_ability_bonus, character.class_ability_bonus]
        .into_iter()
        .flatten()
    {
        if abilities.contains(bonus) {
            abilities.set(bonus, abilities.get(bonus).saturating_add(ABILITY_BONUS));
        }
    }
    abilities
}

/// [`modifier_of`] applied to every effective ability.
pub fn all_modifiers(character: &Character) -> AbilityScores {
    effective_abilities(character).map(modifier_of)
}

/// Modifier for one effective ability, 0 when the key is absent.
pub fn modifier_for(character: &Character, ability: Ability) -> i32 {
    all_modifiers(character).get(ability)
}
