//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `sitecontent_core::storage`. The backend the server runs on is
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): `tokio::sync::RwLock<HashMap>` tables, seeded with demo content
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive. The in-memory repository is always
//! compiled so tests can run against it.
//!
//! # Examples
//!
//! Build with the in-memory backend (default):
//! ```bash
//! cargo build -p sitecontent
//! ```
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p sitecontent --no-default-features --features sqlite
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p sitecontent --no-default-features --features sqlite"
);

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;
