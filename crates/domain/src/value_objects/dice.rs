//! Die sizes and the randomness port
//!
//! Die tokens look like "d8" or "d10". Rolling goes through [`RandomPort`] so
//! the rules stay deterministic under test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when parsing a die token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The token string is empty
    #[error("Empty die token")]
    Empty,
    /// Invalid format - expected dY
    #[error("Invalid die format: {0}")]
    InvalidFormat(String),
    /// The die size is not one of the standard polyhedrals
    #[error("Unsupported die size: {0}")]
    UnsupportedSize(u32),
}

/// Source of uniformly distributed integers.
///
/// Implemented by the engine's RNG adapters and by deterministic test doubles.
pub trait RandomPort {
    /// Integer in `[min, max]`, both inclusive.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}

/// A single polyhedral die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Die {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

/// Recovery die used when a class names none.
pub const DEFAULT_RECOVERY_DIE: Die = Die::D8;

impl Die {
    pub fn sides(self) -> i32 {
        match self {
            Die::D4 => 4,
            Die::D6 => 6,
            Die::D8 => 8,
            Die::D10 => 10,
            Die::D12 => 12,
            Die::D20 => 20,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Die::D4 => "d4",
            Die::D6 => "d6",
            Die::D8 => "d8",
            Die::D10 => "d10",
            Die::D12 => "d12",
            Die::D20 => "d20",
        }
    }

    /// Roll once. The port's answer is clamped into `[1, sides]`.
    pub fn roll<R: RandomPort + ?Sized>(self, rng: &R) -> i32 {
        rng.gen_range(1, self.sides()).clamp(1, self.sides())
    }

    /// Parse a token like "d8" or "D12"
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let size_str = input.strip_prefix('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' prefix in '{}'", input))
        })?;
        let size: u32 = size_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", size_str))
        })?;

        match size {
            4 => Ok(Die::D4),
            6 => Ok(Die::D6),
            8 => Ok(Die::D8),
            10 => Ok(Die::D10),
            12 => Ok(Die::D12),
            20 => Ok(Die::D20),
            other => Err(DiceParseError::UnsupportedSize(other)),
        }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Die {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Die::parse(s)
    }
}

impl TryFrom<String> for Die {
    type Error = DiceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Die::parse(&value)
    }
}

impl From<Die> for String {
    fn from(die: Die) -> Self {
        die.token().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(i32);

    impl RandomPort for Always {
        fn gen_range(&self, _min: i32, _max: i32) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Die::parse("d8").unwrap(), Die::D8);
        assert_eq!(Die::parse(" D10 ").unwrap(), Die::D10);
        assert_eq!(Die::parse(""), Err(DiceParseError::Empty));
        assert!(matches!(
            Die::parse("8"),
            Err(DiceParseError::InvalidFormat(_))
        ));
        assert_eq!(Die::parse("d7"), Err(DiceParseError::UnsupportedSize(7)));
    }

    #[test]
    fn test_serde_uses_token() {
        let json = serde_json::to_string(&Die::D12).unwrap();
        assert_eq!(json, "\"d12\"");
        let die: Die = serde_json::from_str("\"d6\"").unwrap();
        assert_eq!(die, Die::D6);
        assert!(serde_json::from_str::<Die>("\"d3\"").is_err());
    }

    #[test]
    fn test_roll_is_clamped_to_faces() {
        assert_eq!(Die::D6.roll(&Always(4)), 4);
        assert_eq!(Die::D6.roll(&Always(9)), 6);
        assert_eq!(Die::D6.roll(&Always(-3)), 1);
    }
}
