//! In-memory state storage modules.
//!
//! - `CharacterStore` - the in-progress character and its subscribers

pub mod character;

pub use character::{CharacterStore, StoreError, SubscriptionId};
