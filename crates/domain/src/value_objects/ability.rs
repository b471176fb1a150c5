//! Ability keys and ability score mappings
//!
//! The six abilities are fixed. Scores are stored in an ordered map so that a
//! partially populated mapping (e.g. from an incomplete import) is representable,
//! and every lookup against a missing key yields 0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the six fixed ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Constitution,
        Ability::Dexterity,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Short key used on the wire ("STR", "CON", ...).
    pub fn key(self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Constitution => "CON",
            Ability::Dexterity => "DEX",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Constitution => "Constitution",
            Ability::Dexterity => "Dexterity",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    /// Accepts the short key or the full name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Ability::ALL
            .into_iter()
            .find(|a| {
                a.key().eq_ignore_ascii_case(needle) || a.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown ability: {}", s)))
    }
}

/// Mapping from ability to raw score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityScores(BTreeMap<Ability, i32>);

impl AbilityScores {
    /// All six abilities set to the same score.
    pub fn uniform(score: i32) -> Self {
        Ability::ALL.into_iter().map(|a| (a, score)).collect()
    }

    /// Score for `ability`, or 0 when the key is absent.
    pub fn get(&self, ability: Ability) -> i32 {
        self.0.get(&ability).copied().unwrap_or(0)
    }

    pub fn contains(&self, ability: Ability) -> bool {
        self.0.contains_key(&ability)
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        self.0.insert(ability, score);
    }

    /// Builder-style variant of [`AbilityScores::set`].
    pub fn with(mut self, ability: Ability, score: i32) -> Self {
        self.set(ability, score);
        self
    }

    /// Present entries in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        self.0.iter().map(|(a, s)| (*a, *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies `f` to every present entry.
    pub fn map(&self, f: impl Fn(i32) -> i32) -> Self {
        self.iter().map(|(a, s)| (a, f(s))).collect()
    }
}

impl FromIterator<(Ability, i32)> for AbilityScores {
    fn from_iter<T: IntoIterator<Item = (Ability, i32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_names_case_insensitively() {
        assert_eq!("STR".parse::<Ability>().unwrap(), Ability::Strength);
        assert_eq!("dex".parse::<Ability>().unwrap(), Ability::Dexterity);
        assert_eq!("Wisdom".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert!("luck".parse::<Ability>().is_err());
    }

    #[test]
    fn missing_key_reads_as_zero() {
        let scores = AbilityScores::default().with(Ability::Strength, 14);
        assert_eq!(scores.get(Ability::Strength), 14);
        assert_eq!(scores.get(Ability::Charisma), 0);
        assert!(!scores.contains(Ability::Charisma));
    }

    #[test]
    fn serializes_as_flat_key_map() {
        let scores = AbilityScores::uniform(10).with(Ability::Constitution, 16);
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json["CON"], 16);
        assert_eq!(json["CHA"], 10);

        let back: AbilityScores =
            serde_json::from_str(r#"{"STR": 12, "DEX": 8}"#).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.get(Ability::Dexterity), 8);
        assert_eq!(back.get(Ability::Wisdom), 0);
    }

    #[test]
    fn iterates_in_sheet_order() {
        let keys: Vec<_> = AbilityScores::uniform(10).iter().map(|(a, _)| a).collect();
        assert_eq!(keys, Ability::ALL.to_vec());
    }
}
