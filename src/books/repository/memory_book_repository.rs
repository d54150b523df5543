use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{Repository, StoreStatus};

// MemoryBookRepository keeps the collection in process memory, in insertion order.
// It honors the shared StoreStatus so an outage can be simulated by marking it
// disconnected.
#[derive(Debug, Clone)]
pub struct MemoryBookRepository {
    storage: Arc<RwLock<Vec<BookEntity>>>,
    status: StoreStatus,
}

impl MemoryBookRepository {
    pub(crate) fn new(status: StoreStatus) -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
            status,
        }
    }

    fn check_connected(&self) -> LibraryResult<()> {
        if self.status.is_connected() {
            Ok(())
        } else {
            Err(LibraryError::unavailable("memory store is disconnected", Some("Disconnected".to_string()), true))
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.check_connected()?;
        let mut storage = self.storage.write()
            .map_err(|_| LibraryError::runtime("lock poisoned", Some("write".to_string())))?;
        if storage.iter().any(|b| b.id() == entity.id()) {
            return Err(LibraryError::database(format!("book {} already exists", entity.id()).as_str(), None, false));
        }
        storage.push(entity.clone());
        Ok(1)
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.check_connected()?;
        let storage = self.storage.read()
            .map_err(|_| LibraryError::runtime("lock poisoned", Some("read".to_string())))?;
        Ok(storage.clone())
    }

    async fn find_one_and_delete(&self, predicate: &HashMap<String, String>) -> LibraryResult<BookEntity> {
        self.check_connected()?;
        let mut storage = self.storage.write()
            .map_err(|_| LibraryError::runtime("lock poisoned", Some("write".to_string())))?;
        let position = storage.iter().position(|b| {
            predicate.iter().all(|(k, v)| b.attribute(k).as_deref() == Some(v.as_str()))
        });
        match position {
            Some(ndx) => Ok(storage.remove(ndx)),
            None => Err(LibraryError::not_found(format!("no book matches {:?}", predicate).as_str())),
        }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {}
