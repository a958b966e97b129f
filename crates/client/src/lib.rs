//! sitecontent_client - Admin client and CLI for the sitecontent API.

pub mod cli;
pub mod client;
pub mod console;
pub mod error;
pub mod media;
pub mod output;

pub use client::{ContentApi, ContentClient};
pub use error::{ClientError, Result};
