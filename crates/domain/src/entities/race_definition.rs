//! Race definition - the racial ability bonus options

use serde::{Deserialize, Serialize};

use crate::value_objects::Ability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceDefinition {
    pub id: String,
    /// Abilities the race may put its +2 into.
    #[serde(default)]
    pub ability_bonus: Vec<Ability>,
}

impl RaceDefinition {
    pub fn new(id: impl Into<String>, ability_bonus: impl IntoIterator<Item = Ability>) -> Self {
        Self {
            id: id.into(),
            ability_bonus: ability_bonus.into_iter().collect(),
        }
    }

    pub fn offers_bonus(&self, ability: Ability) -> bool {
        self.ability_bonus.contains(&ability)
    }

    /// The bonus ability when the race offers exactly one.
    pub fn sole_bonus(&self) -> Option<Ability> {
        match self.ability_bonus.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}
