//! Class definition - read-only rule content supplied by a data loader
//!
//! Only the fields that feed derived statistics or creation guards are
//! modeled; descriptive text in the source data is ignored on deserialize.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{Ability, ArmorKind, Die};

/// Talent picks offered when a class omits `talentCount`.
pub const DEFAULT_TALENT_COUNT: u32 = 3;

const STR_OR_DEX: &str = "STR_OR_DEX";

/// Per-armor base AC with an optional shield bonus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorClassTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub none: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heavy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shield: Option<i32>,
}

impl ArmorClassTable {
    /// Entry for an armor category, if the class defines one.
    pub fn lookup(&self, kind: ArmorKind) -> Option<i32> {
        match kind {
            ArmorKind::None => self.none,
            ArmorKind::Light => self.light,
            ArmorKind::Heavy => self.heavy,
        }
    }
}

/// Which ability drives an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AttackAbility {
    Single(Ability),
    /// Higher of Strength and Dexterity.
    StrOrDex,
}

impl TryFrom<String> for AttackAbility {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case(STR_OR_DEX) {
            return Ok(AttackAbility::StrOrDex);
        }
        value.parse().map(AttackAbility::Single)
    }
}

impl From<AttackAbility> for String {
    fn from(value: AttackAbility) -> Self {
        match value {
            AttackAbility::Single(ability) => ability.key().to_string(),
            AttackAbility::StrOrDex => STR_OR_DEX.to_string(),
        }
    }
}

impl fmt::Display for AttackAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackAbility::Single(ability) => write!(f, "{}", ability),
            AttackAbility::StrOrDex => f.write_str("Strength or Dexterity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackProfile {
    pub ability: AttackAbility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miss: Option<String>,
}

impl AttackProfile {
    pub fn new(ability: AttackAbility) -> Self {
        Self {
            ability,
            damage_formula: None,
            miss: None,
        }
    }
}

/// Combat baselines and creation options for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    pub id: String,
    #[serde(rename = "baseHP")]
    pub base_hp: i32,
    #[serde(rename = "baseAC")]
    pub base_ac: i32,
    #[serde(rename = "basePD")]
    pub base_pd: i32,
    #[serde(rename = "baseMD")]
    pub base_md: i32,
    #[serde(rename = "armorAC", default, skip_serializing_if = "Option::is_none")]
    pub armor_ac: Option<ArmorClassTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recoveries: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_die: Option<Die>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_die_alt: Option<BTreeMap<Ability, Die>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melee_attack: Option<AttackProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranged_attack: Option<AttackProfile>,
    /// Abilities the class may put its +2 into.
    #[serde(default)]
    pub ability_bonus: Vec<Ability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talent_count: Option<u32>,
}

impl ClassDefinition {
    pub fn new(id: impl Into<String>, base_hp: i32, base_ac: i32, base_pd: i32, base_md: i32) -> Self {
        Self {
            id: id.into(),
            base_hp,
            base_ac,
            base_pd,
            base_md,
            armor_ac: None,
            recoveries: None,
            recovery_die: None,
            recovery_die_alt: None,
            melee_attack: None,
            ranged_attack: None,
            ability_bonus: Vec::new(),
            talent_count: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    pub fn with_armor_ac(mut self, table: ArmorClassTable) -> Self {
        self.armor_ac = Some(table);
        self
    }

    pub fn with_recoveries(mut self, recoveries: i32) -> Self {
        self.recoveries = Some(recoveries);
        self
    }

    pub fn with_recovery_die(mut self, die: Die) -> Self {
        self.recovery_die = Some(die);
        self
    }

    pub fn with_recovery_die_alt(mut self, alt: impl IntoIterator<Item = (Ability, Die)>) -> Self {
        self.recovery_die_alt = Some(alt.into_iter().collect());
        self
    }

    pub fn with_melee_attack(mut self, ability: AttackAbility) -> Self {
        self.melee_attack = Some(AttackProfile::new(ability));
        self
    }

    pub fn with_ranged_attack(mut self, ability: AttackAbility) -> Self {
        self.ranged_attack = Some(AttackProfile::new(ability));
        self
    }

    pub fn with_ability_bonus(mut self, abilities: impl IntoIterator<Item = Ability>) -> Self {
        self.ability_bonus = abilities.into_iter().collect();
        self
    }

    pub fn with_talent_count(mut self, count: u32) -> Self {
        self.talent_count = Some(count);
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of talents a character of this class picks.
    pub fn talent_limit(&self) -> u32 {
        self.talent_count.unwrap_or(DEFAULT_TALENT_COUNT)
    }

    pub fn offers_bonus(&self, ability: Ability) -> bool {
        self.ability_bonus.contains(&ability)
    }

    /// The bonus ability when the class offers exactly one.
    pub fn sole_bonus(&self) -> Option<Ability> {
        match self.ability_bonus.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Whether the class lets the player pick the melee ability.
    pub fn has_melee_choice(&self) -> bool {
        matches!(
            self.melee_attack,
            Some(AttackProfile {
                ability: AttackAbility::StrOrDex,
                ..
            })
        ) || self.recovery_die_alt.is_some()
    }
}
