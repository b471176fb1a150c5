//! Worn armor, carried weapons and shield

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Armor category as used by class AC tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorKind {
    #[default]
    None,
    Light,
    Heavy,
}

impl ArmorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArmorKind::None => "none",
            ArmorKind::Light => "light",
            ArmorKind::Heavy => "heavy",
        }
    }
}

impl fmt::Display for ArmorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "light" => Ok(Self::Light),
            "heavy" => Ok(Self::Heavy),
            _ => Err(DomainError::parse(format!("Unknown armor kind: {}", s))),
        }
    }
}

/// Weapon descriptors are free text; only armor and shield feed the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Equipment {
    pub armor: ArmorKind,
    pub melee_weapon: String,
    pub ranged_weapon: String,
    pub shield: bool,
}

impl Equipment {
    pub fn with_armor(mut self, armor: ArmorKind) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_shield(mut self, shield: bool) -> Self {
        self.shield = shield;
        self
    }
}
