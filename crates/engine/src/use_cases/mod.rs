//! Use cases - User story orchestration.
//!
//! Use cases sit between callers and the character store, applying the
//! creation rules before any mutation happens.

pub mod creation;

pub use creation::CreationError;
