//! Character aggregate - the in-progress character being built
//!
//! Fields are public and serialize to the flat camelCase snapshot document.
//! Every field is defaulted on deserialize so an incomplete document merges
//! onto [`Character::default`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{Ability, AbilityScores, Background, Equipment, IconRelationship};

/// Score every ability starts at.
pub const DEFAULT_ABILITY_SCORE: i32 = 10;
/// Number of empty background slots on a fresh character.
pub const DEFAULT_BACKGROUND_SLOTS: usize = 3;

/// How ability scores are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityMethod {
    #[default]
    #[serde(rename = "pointbuy")]
    PointBuy,
    #[serde(rename = "roll")]
    Roll,
    #[serde(rename = "base13")]
    Base13,
}

impl AbilityMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AbilityMethod::PointBuy => "pointbuy",
            AbilityMethod::Roll => "roll",
            AbilityMethod::Base13 => "base13",
        }
    }

    /// Whether scores come from dice rather than a budget.
    pub fn is_random(self) -> bool {
        !matches!(self, AbilityMethod::PointBuy)
    }
}

impl fmt::Display for AbilityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbilityMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pointbuy" | "point_buy" | "point-buy" => Ok(Self::PointBuy),
            "roll" => Ok(Self::Roll),
            "base13" => Ok(Self::Base13),
            _ => Err(DomainError::parse(format!("Unknown ability method: {}", s))),
        }
    }
}

/// The three id-set selections a character makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    Talent,
    Spell,
    Maneuver,
}

impl SelectionKind {
    pub const ALL: [SelectionKind; 3] = [Self::Talent, Self::Spell, Self::Maneuver];
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Talent => write!(f, "talent"),
            SelectionKind::Spell => write!(f, "spell"),
            SelectionKind::Maneuver => write!(f, "maneuver"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    pub name: String,
    pub level: u8,
    pub race: Option<String>,
    pub class: Option<String>,
    pub racial_ability_bonus: Option<Ability>,
    pub class_ability_bonus: Option<Ability>,
    pub melee_ability_choice: Option<Ability>,
    pub ability_method: AbilityMethod,
    pub abilities: AbilityScores,
    /// Selection order is preserved; ids are unique.
    pub selected_talents: Vec<String>,
    pub selected_spells: Vec<String>,
    pub selected_maneuvers: Vec<String>,
    pub backgrounds: Vec<Background>,
    pub icon_relationships: Vec<IconRelationship>,
    pub one_unique_thing: String,
    pub equipment: Equipment,
    pub completed_steps: Vec<u8>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: 1,
            race: None,
            class: None,
            racial_ability_bonus: None,
            class_ability_bonus: None,
            melee_ability_choice: None,
            ability_method: AbilityMethod::PointBuy,
            abilities: AbilityScores::uniform(DEFAULT_ABILITY_SCORE),
            selected_talents: Vec::new(),
            selected_spells: Vec::new(),
            selected_maneuvers: Vec::new(),
            backgrounds: vec![Background::default(); DEFAULT_BACKGROUND_SLOTS],
            icon_relationships: Vec::new(),
            one_unique_thing: String::new(),
            equipment: Equipment::default(),
            completed_steps: Vec::new(),
        }
    }
}

impl Character {
    pub fn selection(&self, kind: SelectionKind) -> &[String] {
        match kind {
            SelectionKind::Talent => &self.selected_talents,
            SelectionKind::Spell => &self.selected_spells,
            SelectionKind::Maneuver => &self.selected_maneuvers,
        }
    }

    pub fn selection_mut(&mut self, kind: SelectionKind) -> &mut Vec<String> {
        match kind {
            SelectionKind::Talent => &mut self.selected_talents,
            SelectionKind::Spell => &mut self.selected_spells,
            SelectionKind::Maneuver => &mut self.selected_maneuvers,
        }
    }

    pub fn icon_relationship(&self, icon_id: &str) -> Option<&IconRelationship> {
        self.icon_relationships.iter().find(|r| r.icon_id == icon_id)
    }

    pub fn is_step_completed(&self, step: u8) -> bool {
        self.completed_steps.contains(&step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{ArmorKind, RelationshipType};

    #[test]
    fn default_character_matches_fresh_sheet() {
        let c = Character::default();
        assert_eq!(c.level, 1);
        assert_eq!(c.ability_method, AbilityMethod::PointBuy);
        assert_eq!(c.abilities, AbilityScores::uniform(10));
        assert_eq!(c.backgrounds.len(), 3);
        assert!(c.backgrounds.iter().all(|b| b.name.is_empty() && b.points == 0));
        assert_eq!(c.equipment.armor, ArmorKind::None);
        assert!(c.completed_steps.is_empty());
    }

    #[test]
    fn snapshot_uses_camel_case_field_names() {
        let mut c = Character::default();
        c.racial_ability_bonus = Some(Ability::Dexterity);
        c.icon_relationships
            .push(IconRelationship::new("elf-queen", RelationshipType::Positive, 1));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["racialAbilityBonus"], "DEX");
        assert_eq!(json["abilityMethod"], "pointbuy");
        assert_eq!(json["iconRelationships"][0]["iconId"], "elf-queen");
        assert!(json["class"].is_null());
        assert_eq!(json["completedSteps"], serde_json::json!([]));
    }

    #[test]
    fn incomplete_document_falls_back_to_defaults() {
        let c: Character =
            serde_json::from_str(r#"{"name": "Vex", "class": "rogue", "level": 2}"#).unwrap();
        assert_eq!(c.name, "Vex");
        assert_eq!(c.class.as_deref(), Some("rogue"));
        assert_eq!(c.level, 2);
        assert_eq!(c.abilities, AbilityScores::uniform(10));
        assert_eq!(c.backgrounds.len(), 3);
    }

    #[test]
    fn ability_method_parsing() {
        assert_eq!("base13".parse::<AbilityMethod>().unwrap(), AbilityMethod::Base13);
        assert!(AbilityMethod::Roll.is_random());
        assert!(!AbilityMethod::PointBuy.is_random());
        assert!("dice".parse::<AbilityMethod>().is_err());
    }
}
