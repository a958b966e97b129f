//! sitecontent_core - domain types and pure logic shared by the content
//! service and the admin console.
//!
//! Everything in this crate is free of I/O: entity types, request payloads
//! and their validation, listing order, the slot table used by the admin
//! console, and the repository traits the storage backends implement.

pub mod content;
pub mod serde;
pub mod storage;
