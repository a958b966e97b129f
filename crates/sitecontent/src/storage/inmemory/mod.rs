//! In-memory storage backend.
//!
//! Stores all content in HashMaps wrapped in `Arc<RwLock<_>>`. Used for
//! tests and local development; nothing is persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use sitecontent::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
