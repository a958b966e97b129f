//! Content section CLI commands.

use clap::{Parser, Subcommand};
use sitecontent_core::content::Metadata;
use uuid::Uuid;

/// Content section management commands.
#[derive(Debug, Parser)]
pub struct SectionsCommand {
    #[command(subcommand)]
    pub action: SectionsAction,
}

/// Available section actions.
#[derive(Debug, Subcommand)]
pub enum SectionsAction {
    /// Create a new section.
    Create {
        /// Section key (lowercase letters, digits, '-' and '_').
        #[arg(long)]
        key: String,
        /// Section title.
        #[arg(long)]
        title: String,
        /// Body text.
        #[arg(long)]
        content: Option<String>,
        /// Display order.
        #[arg(long)]
        display_order: Option<i32>,
        /// Free-form JSON object stored with the section.
        #[arg(long, value_parser = super::parse_metadata)]
        metadata: Option<Metadata>,
        /// Create the section hidden.
        #[arg(long)]
        inactive: bool,
    },
    /// Update a section. Omitted fields keep their value.
    Update {
        /// Section ID.
        id: Uuid,
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        display_order: Option<i32>,
        /// Replaces the stored metadata.
        #[arg(long, value_parser = super::parse_metadata)]
        metadata: Option<Metadata>,
        /// Show or hide the section.
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a section and its items.
    Delete {
        /// Section ID.
        id: Uuid,
    },
}
