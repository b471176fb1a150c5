//! Character creation steps and per-step completeness checks

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregates::{AbilityMethod, Character};
use crate::error::DomainError;
use crate::rules::{validate_backgrounds, validate_icon_relationships, validate_point_buy};

/// A step of the creation wizard, numbered 1 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CreationStep {
    Race,
    Class,
    Abilities,
    Talents,
    Spells,
    Backgrounds,
    Icons,
    Details,
    Summary,
}

impl CreationStep {
    /// All steps in wizard order.
    pub const ALL: [CreationStep; 9] = [
        CreationStep::Race,
        CreationStep::Class,
        CreationStep::Abilities,
        CreationStep::Talents,
        CreationStep::Spells,
        CreationStep::Backgrounds,
        CreationStep::Icons,
        CreationStep::Details,
        CreationStep::Summary,
    ];

    pub fn number(self) -> u8 {
        match self {
            CreationStep::Race => 1,
            CreationStep::Class => 2,
            CreationStep::Abilities => 3,
            CreationStep::Talents => 4,
            CreationStep::Spells => 5,
            CreationStep::Backgrounds => 6,
            CreationStep::Icons => 7,
            CreationStep::Details => 8,
            CreationStep::Summary => 9,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == number)
    }

    pub fn label(self) -> &'static str {
        match self {
            CreationStep::Race => "Race",
            CreationStep::Class => "Class",
            CreationStep::Abilities => "Abilities",
            CreationStep::Talents => "Talents",
            CreationStep::Spells => "Spells",
            CreationStep::Backgrounds => "Backgrounds",
            CreationStep::Icons => "Icons",
            CreationStep::Details => "Details",
            CreationStep::Summary => "Summary",
        }
    }
}

impl fmt::Display for CreationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl TryFrom<u8> for CreationStep {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
            .ok_or_else(|| DomainError::parse(format!("Unknown creation step: {}", value)))
    }
}

impl From<CreationStep> for u8 {
    fn from(step: CreationStep) -> Self {
        step.number()
    }
}

/// Checks whether `character` has what `step` needs before moving on.
pub fn validate_step(step: CreationStep, character: &Character) -> Result<(), DomainError> {
    match step {
        CreationStep::Race => {
            if character.race.as_deref().map_or(true, str::is_empty) {
                return Err(DomainError::validation("Choose a race"));
            }
            if character.racial_ability_bonus.is_none() {
                return Err(DomainError::validation("Choose a racial ability bonus"));
            }
            Ok(())
        }
        CreationStep::Class => {
            if character.class.as_deref().map_or(true, str::is_empty) {
                return Err(DomainError::validation("Choose a class"));
            }
            if character.class_ability_bonus.is_none() {
                return Err(DomainError::validation("Choose a class ability bonus"));
            }
            Ok(())
        }
        CreationStep::Abilities => {
            if character.ability_method == AbilityMethod::PointBuy {
                validate_point_buy(&character.abilities)?;
            }
            Ok(())
        }
        CreationStep::Backgrounds => Ok(validate_backgrounds(&character.backgrounds)?),
        CreationStep::Icons => Ok(validate_icon_relationships(&character.icon_relationships)?),
        CreationStep::Details => {
            if character.name.trim().is_empty() {
                return Err(DomainError::validation("Character name cannot be empty"));
            }
            Ok(())
        }
        CreationStep::Talents | CreationStep::Spells | CreationStep::Summary => Ok(()),
    }
}

/// The earliest step the character does not yet satisfy.
pub fn first_invalid_step(character: &Character) -> Option<(CreationStep, DomainError)> {
    CreationStep::ALL
        .into_iter()
        .find_map(|step| validate_step(step, character).err().map(|e| (step, e)))
}
