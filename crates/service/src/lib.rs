//! Service layer providing the item CRUD operations on top of `models`.
//! - Separates business logic from persistence.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every operation reloads and rewrites the whole collection; nothing is cached.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod items;
pub mod file;
