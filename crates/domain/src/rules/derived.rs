//! Derived combat statistics
//!
//! Every calculator takes the character and an optional class definition.
//! Without a class, numeric results are 0 and display strings are
//! [`PLACEHOLDER`]; nothing here fails. Initiative is the one stat that does
//! not need a class.

use serde::{Deserialize, Serialize};

use super::modifiers::{all_modifiers, effective_abilities, format_modifier};
use crate::aggregates::Character;
use crate::entities::{AttackAbility, ClassDefinition};
use crate::value_objects::{Ability, AbilityScores, Die, DEFAULT_RECOVERY_DIE};

/// Display value for stats that need a class definition.
pub const PLACEHOLDER: &str = "—";
/// Recovery count for a class that does not specify one.
pub const DEFAULT_RECOVERIES: i32 = 8;

/// Full derived sheet, recomputed on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub abilities: AbilityScores,
    pub modifiers: AbilityScores,
    pub hp: i32,
    pub ac: i32,
    pub pd: i32,
    pub md: i32,
    pub initiative: i32,
    pub recoveries: i32,
    pub recovery_dice: String,
    pub melee_attack_bonus: String,
    pub ranged_attack_bonus: String,
}

/// Middle value of three; a repeated value wins ties.
pub fn median_value(a: i32, b: i32, c: i32) -> i32 {
    let mut values = [a, b, c];
    values.sort_unstable();
    values[1]
}

pub fn hp_multiplier(level: u8) -> i32 {
    i32::from(level) + 2
}

fn level_of(character: &Character) -> i32 {
    i32::from(character.level)
}

fn median_of(mods: &AbilityScores, triple: [Ability; 3]) -> i32 {
    median_value(mods.get(triple[0]), mods.get(triple[1]), mods.get(triple[2]))
}

const AC_ABILITIES: [Ability; 3] = [Ability::Constitution, Ability::Dexterity, Ability::Wisdom];
const PD_ABILITIES: [Ability; 3] = [Ability::Strength, Ability::Constitution, Ability::Dexterity];
const MD_ABILITIES: [Ability; 3] = [Ability::Intelligence, Ability::Wisdom, Ability::Charisma];

// =============================================================================
// Hit points and defenses
// =============================================================================

/// `max(1, (baseHP + CON mod) * (level + 2))`
pub fn calculate_hp(character: &Character, class: Option<&ClassDefinition>) -> i32 {
    class.map_or(0, |class| hp_with(character, class, &all_modifiers(character)))
}

fn hp_with(character: &Character, class: &ClassDefinition, mods: &AbilityScores) -> i32 {
    let per_level = class.base_hp.saturating_add(mods.get(Ability::Constitution));
    per_level.saturating_mul(hp_multiplier(character.level)).max(1)
}

/// Armor-adjusted base AC before modifiers and level.
///
/// With an armor table: the equipped category's entry, else the table's
/// `none` entry, else `baseAC`; plus the shield entry when a shield is worn.
/// Without a table, `baseAC` unchanged.
pub fn resolve_base_ac(character: &Character, class: &ClassDefinition) -> i32 {
    let Some(table) = &class.armor_ac else {
        return class.base_ac;
    };
    let armor = table
        .lookup(character.equipment.armor)
        .or(table.none)
        .unwrap_or(class.base_ac);
    let shield = if character.equipment.shield {
        table.shield.unwrap_or(0)
    } else {
        0
    };
    armor.saturating_add(shield)
}

pub fn calculate_ac(character: &Character, class: Option<&ClassDefinition>) -> i32 {
    class.map_or(0, |class| ac_with(character, class, &all_modifiers(character)))
}

fn ac_with(character: &Character, class: &ClassDefinition, mods: &AbilityScores) -> i32 {
    resolve_base_ac(character, class)
        .saturating_add(median_of(mods, AC_ABILITIES))
        .saturating_add(level_of(character))
}

pub fn calculate_pd(character: &Character, class: Option<&ClassDefinition>) -> i32 {
    class.map_or(0, |class| pd_with(character, class, &all_modifiers(character)))
}

fn pd_with(character: &Character, class: &ClassDefinition, mods: &AbilityScores) -> i32 {
    class
        .base_pd
        .saturating_add(median_of(mods, PD_ABILITIES))
        .saturating_add(level_of(character))
}

pub fn calculate_md(character: &Character, class: Option<&ClassDefinition>) -> i32 {
    class.map_or(0, |class| md_with(character, class, &all_modifiers(character)))
}

fn md_with(character: &Character, class: &ClassDefinition, mods: &AbilityScores) -> i32 {
    class
        .base_md
        .saturating_add(median_of(mods, MD_ABILITIES))
        .saturating_add(level_of(character))
}

/// DEX modifier plus level.
pub fn calculate_initiative(character: &Character) -> i32 {
    initiative_with(character, &all_modifiers(character))
}

fn initiative_with(character: &Character, mods: &AbilityScores) -> i32 {
    mods.get(Ability::Dexterity) + level_of(character)
}

// =============================================================================
// Recoveries
// =============================================================================

pub fn calculate_recoveries(class: Option<&ClassDefinition>) -> i32 {
    class.map_or(0, |class| class.recoveries.unwrap_or(DEFAULT_RECOVERIES))
}

/// Recovery die for this character.
///
/// Classes with an alternate table key it on the melee ability choice; a
/// missing choice or table entry falls through to `recoveryDie`, then `d8`.
pub fn resolve_recovery_die(character: &Character, class: &ClassDefinition) -> Die {
    let alternate = class
        .recovery_die_alt
        .as_ref()
        .zip(character.melee_ability_choice)
        .and_then(|(alt, choice)| alt.get(&choice).copied());
    alternate
        .or(class.recovery_die)
        .unwrap_or(DEFAULT_RECOVERY_DIE)
}

/// `"{level}{die}{signed CON mod}"`, e.g. `1d8+2`.
pub fn recovery_dice_display(character: &Character, class: Option<&ClassDefinition>) -> String {
    match class {
        Some(class) => recovery_dice_with(character, class, &all_modifiers(character)),
        None => PLACEHOLDER.to_string(),
    }
}

fn recovery_dice_with(character: &Character, class: &ClassDefinition, mods: &AbilityScores) -> String {
    format!(
        "{}{}{}",
        character.level,
        resolve_recovery_die(character, class),
        format_modifier(mods.get(Ability::Constitution))
    )
}

// =============================================================================
// Attacks
// =============================================================================

pub fn melee_attack_bonus(character: &Character, class: Option<&ClassDefinition>) -> String {
    match class {
        Some(class) => melee_with(character, class, &all_modifiers(character)),
        None => PLACEHOLDER.to_string(),
    }
}

fn melee_with(character: &Character, class: &ClassDefinition, mods: &AbilityScores) -> String {
    let ability_mod = match class.melee_attack.as_ref().map(|m| m.ability) {
        Some(AttackAbility::Single(ability)) => mods.get(ability),
        Some(AttackAbility::StrOrDex) => mods
            .get(Ability::Strength)
            .max(mods.get(Ability::Dexterity)),
        None => 0,
    };
    format_modifier(ability_mod + level_of(character))
}

/// Always Dexterity based, whatever the class's ranged descriptor says.
pub fn ranged_attack_bonus(character: &Character, class: Option<&ClassDefinition>) -> String {
    match class {
        Some(_) => ranged_with(character, &all_modifiers(character)),
        None => PLACEHOLDER.to_string(),
    }
}

fn ranged_with(character: &Character, mods: &AbilityScores) -> String {
    format_modifier(mods.get(Ability::Dexterity) + level_of(character))
}

/// Every derived value in one pass.
pub fn calculate_all(character: &Character, class: Option<&ClassDefinition>) -> DerivedStats {
    let abilities = effective_abilities(character);
    let mods = all_modifiers(character);

    let (hp, ac, pd, md, recovery_dice, melee, ranged) = match class {
        Some(class) => (
            hp_with(character, class, &mods),
            ac_with(character, class, &mods),
            pd_with(character, class, &mods),
            md_with(character, class, &mods),
            recovery_dice_with(character, class, &mods),
            melee_with(character, class, &mods),
            ranged_with(character, &mods),
        ),
        None => (
            0,
            0,
            0,
            0,
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
        ),
    };

    DerivedStats {
        initiative: initiative_with(character, &mods),
        recoveries: calculate_recoveries(class),
        abilities,
        modifiers: mods,
        hp,
        ac,
        pd,
        md,
        recovery_dice,
        melee_attack_bonus: melee,
        ranged_attack_bonus: ranged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ArmorClassTable;
    use crate::value_objects::{ArmorKind, Equipment};

    fn fighter() -> ClassDefinition {
        ClassDefinition::new("fighter", 8, 15, 10, 10)
            .with_armor_ac(ArmorClassTable {
                none: Some(10),
                light: Some(12),
                heavy: Some(15),
                shield: Some(1),
            })
            .with_recoveries(9)
            .with_recovery_die(Die::D10)
            .with_melee_attack(AttackAbility::Single(Ability::Strength))
    }

    fn druid() -> ClassDefinition {
        ClassDefinition::new("druid", 6, 10, 11, 11)
            .with_recovery_die(Die::D6)
            .with_recovery_die_alt([(Ability::Strength, Die::D10), (Ability::Dexterity, Die::D6)])
            .with_melee_attack(AttackAbility::StrOrDex)
    }

    fn wearing(armor: ArmorKind, shield: bool) -> Character {
        Character {
            equipment: Equipment::default().with_armor(armor).with_shield(shield),
            ..Character::default()
        }
    }

    #[test]
    fn median_is_permutation_invariant() {
        for (a, b, c) in [(1, 2, 3), (3, 1, 2), (2, 3, 1), (3, 2, 1)] {
            assert_eq!(median_value(a, b, c), 2);
        }
        assert_eq!(median_value(5, 5, 5), 5);
        assert_eq!(median_value(0, 0, 3), 0);
        assert_eq!(median_value(3, 0, 3), 3);
        assert_eq!(median_value(-2, 4, -2), -2);
    }

    #[test]
    fn extreme_scores_saturate() {
        let mut character = Character::default();
        character.abilities.set(Ability::Strength, i32::MIN);
        character.abilities.set(Ability::Constitution, i32::MAX);
        character.abilities.set(Ability::Dexterity, i32::MIN);
        character.racial_ability_bonus = Some(Ability::Constitution);
        character.class_ability_bonus = Some(Ability::Constitution);
        let titan = ClassDefinition::new("titan", i32::MAX, i32::MAX, i32::MAX, i32::MAX);

        let stats = calculate_all(&character, Some(&titan));
        assert_eq!(stats.abilities.get(Ability::Constitution), i32::MAX);
        assert_eq!(stats.modifiers.get(Ability::Strength), i32::MIN / 2);
        assert_eq!(stats.hp, i32::MAX);
        assert_eq!(stats.ac, i32::MAX);
        assert_eq!(stats.md, i32::MAX);
        assert_eq!(stats.initiative, i32::MIN / 2 + 1);

        let empty = calculate_all(&character, None);
        assert_eq!(empty.hp, 0);
    }

    #[test]
    fn hp_multiplier_is_level_plus_two() {
        for level in [1u8, 2, 3, 5, 10] {
            assert_eq!(hp_multiplier(level), i32::from(level) + 2);
        }
    }

    #[test]
    fn hp_never_drops_below_one() {
        let frail = ClassDefinition::new("frail", 2, 10, 10, 10);
        let character = Character {
            abilities: AbilityScores::uniform(10).with(Ability::Constitution, 3),
            ..Character::default()
        };
        // (2 + -4) * 3 = -6
        assert_eq!(calculate_hp(&character, Some(&frail)), 1);
    }

    #[test]
    fn fighter_unarmored_end_to_end() {
        let character = Character::default();
        let stats = calculate_all(&character, Some(&fighter()));
        assert_eq!(stats.hp, 24);
        assert_eq!(stats.ac, 11);
        assert_eq!(stats.initiative, 1);
        assert_eq!(stats.pd, 11);
        assert_eq!(stats.md, 11);
        assert_eq!(stats.recoveries, 9);
        assert_eq!(stats.recovery_dice, "1d10+0");
        assert_eq!(stats.melee_attack_bonus, "+1");
        assert_eq!(stats.ranged_attack_bonus, "+1");
    }

    #[test]
    fn fighter_heavy_armor_and_shield() {
        let character = wearing(ArmorKind::Heavy, true);
        assert_eq!(calculate_ac(&character, Some(&fighter())), 17);
    }

    #[test]
    fn missing_armor_entry_falls_back_to_none_entry() {
        let class = ClassDefinition::new("rogue", 6, 12, 12, 10).with_armor_ac(ArmorClassTable {
            none: Some(10),
            light: Some(12),
            heavy: None,
            shield: Some(1),
        });
        let character = wearing(ArmorKind::Heavy, false);
        assert_eq!(resolve_base_ac(&character, &class), 10);
    }

    #[test]
    fn missing_none_entry_falls_back_to_base_ac() {
        let class = ClassDefinition::new("odd", 6, 13, 10, 10).with_armor_ac(ArmorClassTable {
            light: Some(12),
            ..ArmorClassTable::default()
        });
        assert_eq!(resolve_base_ac(&wearing(ArmorKind::Heavy, false), &class), 13);
        assert_eq!(resolve_base_ac(&wearing(ArmorKind::None, false), &class), 13);
    }

    #[test]
    fn shield_ignored_without_armor_table() {
        let class = ClassDefinition::new("plain", 6, 12, 10, 10);
        assert_eq!(resolve_base_ac(&wearing(ArmorKind::Light, true), &class), 12);
    }

    #[test]
    fn defenses_use_median_modifier() {
        let character = Character {
            abilities: AbilityScores::uniform(10)
                .with(Ability::Strength, 18)
                .with(Ability::Constitution, 14)
                .with(Ability::Dexterity, 8),
            ..Character::default()
        };
        // STR +4, CON +2, DEX -1 -> median +2
        assert_eq!(calculate_pd(&character, Some(&fighter())), 10 + 2 + 1);
        // CON +2, DEX -1, WIS 0 -> median 0
        assert_eq!(calculate_ac(&character, Some(&fighter())), 10 + 1);
    }

    #[test]
    fn recovery_die_follows_melee_choice() {
        let mut character = Character {
            melee_ability_choice: Some(Ability::Strength),
            ..Character::default()
        };
        assert_eq!(resolve_recovery_die(&character, &druid()), Die::D10);

        character.melee_ability_choice = None;
        assert_eq!(resolve_recovery_die(&character, &druid()), Die::D6);

        character.melee_ability_choice = Some(Ability::Wisdom);
        assert_eq!(resolve_recovery_die(&character, &druid()), Die::D6);
    }

    #[test]
    fn recovery_die_defaults_to_d8() {
        let class = ClassDefinition::new("bare", 6, 10, 10, 10);
        assert_eq!(resolve_recovery_die(&Character::default(), &class), Die::D8);
        assert_eq!(calculate_recoveries(Some(&class)), DEFAULT_RECOVERIES);
    }

    #[test]
    fn recovery_display_includes_signed_con() {
        let character = Character {
            level: 3,
            abilities: AbilityScores::uniform(10).with(Ability::Constitution, 14),
            ..Character::default()
        };
        assert_eq!(recovery_dice_display(&character, Some(&fighter())), "3d10+2");

        let weak = Character {
            abilities: AbilityScores::uniform(10).with(Ability::Constitution, 7),
            ..Character::default()
        };
        assert_eq!(recovery_dice_display(&weak, Some(&fighter())), "1d10-2");
    }

    #[test]
    fn str_or_dex_uses_higher_modifier() {
        let character = Character {
            abilities: AbilityScores::uniform(10)
                .with(Ability::Strength, 8)
                .with(Ability::Dexterity, 16),
            ..Character::default()
        };
        assert_eq!(melee_attack_bonus(&character, Some(&druid())), "+4");
    }

    #[test]
    fn melee_without_descriptor_uses_level_only() {
        let class = ClassDefinition::new("bare", 6, 10, 10, 10);
        let character = Character {
            abilities: AbilityScores::uniform(16),
            ..Character::default()
        };
        assert_eq!(melee_attack_bonus(&character, Some(&class)), "+1");
    }

    #[test]
    fn no_class_degrades_to_zero_and_placeholder() {
        let character = Character::default();
        let stats = calculate_all(&character, None);
        assert_eq!((stats.hp, stats.ac, stats.pd, stats.md, stats.recoveries), (0, 0, 0, 0, 0));
        assert_eq!(stats.recovery_dice, PLACEHOLDER);
        assert_eq!(stats.melee_attack_bonus, PLACEHOLDER);
        assert_eq!(stats.ranged_attack_bonus, PLACEHOLDER);
        assert_eq!(stats.initiative, 1);
        assert_eq!(stats.abilities, AbilityScores::uniform(10));
    }

    #[test]
    fn calculate_all_matches_individual_calculators() {
        let character = Character {
            level: 4,
            racial_ability_bonus: Some(Ability::Dexterity),
            class_ability_bonus: Some(Ability::Constitution),
            abilities: AbilityScores::uniform(12).with(Ability::Wisdom, 15),
            equipment: Equipment::default().with_armor(ArmorKind::Light),
            ..Character::default()
        };
        let class = fighter();
        let stats = calculate_all(&character, Some(&class));
        assert_eq!(stats.hp, calculate_hp(&character, Some(&class)));
        assert_eq!(stats.ac, calculate_ac(&character, Some(&class)));
        assert_eq!(stats.pd, calculate_pd(&character, Some(&class)));
        assert_eq!(stats.md, calculate_md(&character, Some(&class)));
        assert_eq!(stats.initiative, calculate_initiative(&character));
        assert_eq!(stats.recovery_dice, recovery_dice_display(&character, Some(&class)));
        assert_eq!(stats.melee_attack_bonus, melee_attack_bonus(&character, Some(&class)));
        assert_eq!(stats.ranged_attack_bonus, ranged_attack_bonus(&character, Some(&class)));
    }

    #[test]
    fn derived_stats_wire_names() {
        let json = serde_json::to_value(calculate_all(&Character::default(), Some(&fighter()))).unwrap();
        assert_eq!(json["recoveryDice"], "1d10+0");
        assert_eq!(json["meleeAttackBonus"], "+1");
        assert_eq!(json["modifiers"]["STR"], 0);
    }
}
