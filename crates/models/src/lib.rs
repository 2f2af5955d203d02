//! Domain types for the item catalogue.
//! - `Item` is the persisted record; `ItemCreate`/`ItemUpdate` are caller inputs.
//! - Field constraints live here so every layer validates the same way.

pub mod errors;
pub mod item;
pub mod timestamp;

pub use item::{Item, ItemCreate, ItemUpdate};
pub use timestamp::Timestamp;
