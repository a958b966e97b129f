//! Content item CLI commands.

use clap::{Parser, Subcommand};
use sitecontent_core::content::Metadata;
use uuid::Uuid;

/// Content item management commands.
#[derive(Debug, Parser)]
pub struct ItemsCommand {
    #[command(subcommand)]
    pub action: ItemsAction,
}

/// Available item actions.
#[derive(Debug, Subcommand)]
pub enum ItemsAction {
    /// Create a new item.
    Create {
        /// Owning section ID.
        #[arg(long)]
        section_id: Uuid,
        /// Item title.
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        #[arg(long)]
        display_order: Option<i32>,
        /// Free-form JSON object stored with the item.
        #[arg(long, value_parser = super::parse_metadata)]
        metadata: Option<Metadata>,
        /// Create the item hidden.
        #[arg(long)]
        inactive: bool,
    },
    /// Update an item. Omitted fields keep their value.
    Update {
        /// Item ID.
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        #[arg(long)]
        display_order: Option<i32>,
        /// Replaces the stored metadata.
        #[arg(long, value_parser = super::parse_metadata)]
        metadata: Option<Metadata>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete an item.
    Delete {
        /// Item ID.
        id: Uuid,
    },
}
