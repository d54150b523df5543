use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // returns every entity in insertion order
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;

    // atomically removes a single entity matching all predicate attributes
    // and returns it; fails with not-found when nothing matches
    async fn find_one_and_delete(&self, predicate: &HashMap<String, String>) -> LibraryResult<Entity>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl FromStr for RepositoryStore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dynamodb" | "ddb" => Ok(RepositoryStore::DynamoDB),
            "local" | "localdynamodb" => Ok(RepositoryStore::LocalDynamoDB),
            "memory" | "mem" => Ok(RepositoryStore::Memory),
            other => Err(format!("unknown store {}", other)),
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local"),
            RepositoryStore::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum ConnectionState {
    Disconnected,
    Connected,
}

impl Display for ConnectionState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connected => write!(f, "Connected"),
        }
    }
}

// StoreStatus is the process-wide connectivity indicator of the store client. It is
// shared by the repository, which records what the client observes, and the status
// endpoints, which only read it.
#[derive(Debug, Clone, Default)]
pub(crate) struct StoreStatus {
    connected: Arc<AtomicBool>,
}

impl StoreStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        if self.connected.load(Ordering::Acquire) {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn mark_connected(&self) {
        if !self.connected.swap(true, Ordering::AcqRel) {
            info!("store connection state changed to {}", ConnectionState::Connected);
        }
    }

    pub fn mark_disconnected(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            warn!("store connection state changed to {}", ConnectionState::Disconnected);
        }
    }
}
