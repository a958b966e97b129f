//! Lazily opened, process-wide content store.
//!
//! The [`StoreHandle`] is created at startup and handed to the dispatcher.
//! Nothing is opened until the first request that needs the store; after
//! [`StoreHandle::close`] the next request opens it again.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sitecontent_core::storage::{
    FaqRepository, ItemRepository, RepositoryError, SectionRepository, TestimonialRepository,
};

#[cfg(feature = "sqlite")]
use crate::storage::sqlite::SqliteRepository;
use crate::{seed::seed_if_empty, storage::inmemory::InMemoryRepository};

/// Everything the service layer needs from a backend.
pub trait ContentStore:
    SectionRepository + ItemRepository + TestimonialRepository + FaqRepository
{
}

impl<T> ContentStore for T where
    T: SectionRepository + ItemRepository + TestimonialRepository + FaqRepository
{
}

/// Opens a connection to a backend.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn ContentStore>, RepositoryError>;
}

/// Connector for the in-memory backend. Reopening yields the same tables.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "sqlite", allow(dead_code))]
pub struct InMemoryConnector {
    repo: InMemoryRepository,
    seed: bool,
}

#[cfg_attr(feature = "sqlite", allow(dead_code))]
impl InMemoryConnector {
    pub fn new(repo: InMemoryRepository) -> Self {
        Self { repo, seed: false }
    }

    /// Seed demo content the first time the store is opened.
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }
}

#[async_trait]
impl StoreConnector for InMemoryConnector {
    async fn connect(&self) -> Result<Arc<dyn ContentStore>, RepositoryError> {
        let store: Arc<dyn ContentStore> = Arc::new(self.repo.clone());
        if self.seed {
            seed_if_empty(store.as_ref()).await?;
        }
        Ok(store)
    }
}

/// Connector for a SQLite database file.
#[cfg(feature = "sqlite")]
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: String,
    seed: bool,
}

#[cfg(feature = "sqlite")]
impl SqliteConnector {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            seed: false,
        }
    }

    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(feature = "sqlite")]
#[async_trait]
impl StoreConnector for SqliteConnector {
    async fn connect(&self) -> Result<Arc<dyn ContentStore>, RepositoryError> {
        tracing::info!(path = %self.path, "Opening SQLite database");
        let store: Arc<dyn ContentStore> = Arc::new(SqliteRepository::new(&self.path).await?);
        if self.seed {
            seed_if_empty(store.as_ref()).await?;
        }
        Ok(store)
    }
}

/// Process-wide handle to the content store.
pub struct StoreHandle {
    connector: Box<dyn StoreConnector>,
    store: RwLock<Option<Arc<dyn ContentStore>>>,
}

impl StoreHandle {
    /// Creates a closed handle. Nothing is opened until [`StoreHandle::get`].
    pub fn new(connector: impl StoreConnector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
            store: RwLock::new(None),
        }
    }

    /// Returns the open store, opening it first if needed.
    ///
    /// Concurrent callers on a closed handle wait for a single open.
    pub async fn get(&self) -> Result<Arc<dyn ContentStore>, RepositoryError> {
        if let Some(store) = self.store.read().await.as_ref() {
            return Ok(Arc::clone(store));
        }

        let mut slot = self.store.write().await;
        // Another caller may have opened it while we waited for the lock.
        if let Some(store) = slot.as_ref() {
            return Ok(Arc::clone(store));
        }

        let store = self.connector.connect().await?;
        tracing::info!("Content store opened");
        *slot = Some(Arc::clone(&store));
        Ok(store)
    }

    /// Drops the open store. The next [`StoreHandle::get`] reopens it.
    pub async fn close(&self) {
        if self.store.write().await.take().is_some() {
            tracing::info!("Content store closed");
        }
    }

    pub async fn is_open(&self) -> bool {
        self.store.read().await.is_some()
    }
}
