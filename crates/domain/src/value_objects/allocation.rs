//! Point-budgeted narrative selections: backgrounds and icon relationships

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A free-text background with points invested in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub name: String,
    pub points: i32,
}

impl Background {
    pub fn new(name: impl Into<String>, points: i32) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// How the character stands with an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Positive,
    Conflicted,
    Negative,
}

impl RelationshipType {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipType::Positive => "positive",
            RelationshipType::Conflicted => "conflicted",
            RelationshipType::Negative => "negative",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "conflicted" => Ok(Self::Conflicted),
            "negative" => Ok(Self::Negative),
            _ => Err(DomainError::parse(format!(
                "Unknown relationship type: {}",
                s
            ))),
        }
    }
}

/// A relationship with one icon. At most one per `icon_id` on a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRelationship {
    pub icon_id: String,
    #[serde(rename = "type")]
    pub relationship: RelationshipType,
    pub points: i32,
}

impl IconRelationship {
    pub fn new(icon_id: impl Into<String>, relationship: RelationshipType, points: i32) -> Self {
        Self {
            icon_id: icon_id.into(),
            relationship,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_relationship_wire_names() {
        let rel = IconRelationship::new("archmage", RelationshipType::Conflicted, 2);
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["iconId"], "archmage");
        assert_eq!(json["type"], "conflicted");
        assert_eq!(json["points"], 2);
    }

    #[test]
    fn background_tolerates_missing_fields() {
        let bg: Background = serde_json::from_str(r#"{"name": "Thief"}"#).unwrap();
        assert_eq!(bg, Background::new("Thief", 0));
    }

    #[test]
    fn relationship_type_from_str() {
        assert_eq!(
            "Negative".parse::<RelationshipType>().unwrap(),
            RelationshipType::Negative
        );
        assert!("friendly".parse::<RelationshipType>().is_err());
    }
}
