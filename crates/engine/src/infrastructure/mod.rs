//! Infrastructure adapters: content catalog, randomness, settings.

pub mod catalog;
pub mod ports;
pub mod random;
pub mod settings;
