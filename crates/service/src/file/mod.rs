//! File-backed store implementations.

pub mod item_store;
