//! Slot CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sitecontent_core::content::ABOUT_FEATURE_SLOTS;

/// Slot commands for fixed-layout sections.
#[derive(Debug, Parser)]
pub struct SlotsCommand {
    /// Section key.
    #[arg(long, default_value = "about")]
    pub section: String,

    /// Number of slots in the layout.
    #[arg(long, default_value_t = ABOUT_FEATURE_SLOTS)]
    pub count: u32,

    #[command(subcommand)]
    pub action: SlotsAction,
}

/// Available slot actions.
#[derive(Debug, Subcommand)]
pub enum SlotsAction {
    /// Show every slot and the item bound to it.
    Show,
    /// Save a slot, creating its item if needed.
    Save {
        /// Slot number, starting at 1.
        slot: u32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        /// Image file to upload.
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a slot's image.
    RemoveImage {
        /// Slot number, starting at 1.
        slot: u32,
    },
}
