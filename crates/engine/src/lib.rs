//! Sheetsmith engine: character store, creation use cases and adapters.

pub mod infrastructure;
pub mod stores;
pub mod use_cases;
