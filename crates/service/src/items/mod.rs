//! Item store contract and identifier policy.

use async_trait::async_trait;
use models::{Item, ItemCreate, ItemUpdate};

use crate::errors::ServiceError;

/// Trait abstraction for item storage.
///
/// Every call works on the whole collection: it is loaded at the start and,
/// for mutations, written back in full at the end. Validation and not-found
/// failures return before anything is written.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn load(&self) -> Vec<Item>;
    async fn save(&self, items: &[Item]) -> Result<(), ServiceError>;
    async fn create(&self, input: ItemCreate) -> Result<Item, ServiceError>;
    async fn read_all(&self) -> Vec<Item>;
    async fn read_one(&self, id: u64) -> Result<Item, ServiceError>;
    async fn update(&self, id: u64, input: ItemUpdate) -> Result<Item, ServiceError>;
    async fn delete(&self, id: u64) -> Result<(), ServiceError>;
    async fn delete_all(&self) -> Result<(), ServiceError>;
}

/// Next identifier: `1` for an empty collection, else highest id + 1.
///
/// Not a counter. Deleting the highest item lets its id be issued again.
pub fn next_id(items: &[Item]) -> u64 {
    items.iter().map(|i| i.id).max().map_or(1, |max| max + 1)
}
