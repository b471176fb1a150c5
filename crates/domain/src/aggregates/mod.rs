//! Aggregates - the mutable character and its defaults

mod character;

pub use character::{
    AbilityMethod, Character, SelectionKind, DEFAULT_ABILITY_SCORE, DEFAULT_BACKGROUND_SLOTS,
};
