//! Content read commands.

use clap::{Parser, Subcommand};

/// Content read commands.
#[derive(Debug, Parser)]
pub struct ContentCommand {
    #[command(subcommand)]
    pub action: ContentAction,
}

#[derive(Debug, Subcommand)]
pub enum ContentAction {
    /// All public (active) content.
    All,
    /// All content, including inactive rows.
    Admin,
    /// Content for one section key (hero, about, features, events,
    /// testimonials, faqs or a custom key).
    Section {
        /// Section key.
        key: String,
    },
}
