use std::{path::{Path, PathBuf}, sync::Arc};

use models::{Item, ItemCreate, ItemUpdate, Timestamp};
use tracing::info;

use crate::errors::ServiceError;
use crate::items::{next_id, ItemStore};
use crate::storage::json_file_store::JsonFileStore;

/// Item store persisted as a JSON array in a single file.
///
/// The handle only carries the file path; the collection is re-read on every
/// call, so two handles on the same path observe each other's writes.
#[derive(Clone)]
pub struct FileItemStore {
    store: JsonFileStore<Item>,
}

impl FileItemStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonFileStore::new(path) })
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub async fn load(&self) -> Vec<Item> {
        self.store.load().await
    }

    pub async fn save(&self, items: &[Item]) -> Result<(), ServiceError> {
        self.store.save(items).await
    }

    /// Validate, assign the next id, append and persist.
    pub async fn create(&self, input: ItemCreate) -> Result<Item, ServiceError> {
        input.validate()?;
        let mut items = self.load().await;
        let item = Item::new(next_id(&items), input, Timestamp::now());
        items.push(item.clone());
        self.save(&items).await?;
        info!(id = item.id, name = %item.name, "item created");
        Ok(item)
    }

    pub async fn read_all(&self) -> Vec<Item> {
        self.load().await
    }

    pub async fn read_one(&self, id: u64) -> Result<Item, ServiceError> {
        self.load()
            .await
            .into_iter()
            .find(|i| i.id == id)
            .ok_or(ServiceError::NotFound(id))
    }

    /// Merge the supplied fields into an existing item and persist.
    pub async fn update(&self, id: u64, input: ItemUpdate) -> Result<Item, ServiceError> {
        input.validate()?;
        let mut items = self.load().await;
        let existing = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        input.apply(existing, Timestamp::now());
        let updated = existing.clone();
        self.save(&items).await?;
        info!(id, "item updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let mut items = self.load().await;
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        items.remove(idx);
        self.save(&items).await?;
        info!(id, remaining = items.len(), "item deleted");
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<(), ServiceError> {
        self.save(&[]).await?;
        info!("all items deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ItemStore for FileItemStore {
    async fn load(&self) -> Vec<Item> { self.load().await }
    async fn save(&self, items: &[Item]) -> Result<(), ServiceError> { self.save(items).await }
    async fn create(&self, input: ItemCreate) -> Result<Item, ServiceError> { self.create(input).await }
    async fn read_all(&self) -> Vec<Item> { self.read_all().await }
    async fn read_one(&self, id: u64) -> Result<Item, ServiceError> { self.read_one(id).await }
    async fn update(&self, id: u64, input: ItemUpdate) -> Result<Item, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: u64) -> Result<(), ServiceError> { self.delete(id).await }
    async fn delete_all(&self) -> Result<(), ServiceError> { self.delete_all().await }
}
