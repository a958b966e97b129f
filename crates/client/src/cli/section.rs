//! Section editor CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Section text and image commands.
#[derive(Debug, Parser)]
pub struct SectionCommand {
    #[command(subcommand)]
    pub action: SectionAction,
}

#[derive(Debug, Subcommand)]
pub enum SectionAction {
    /// Save a section's title, text and image.
    Save {
        /// Section key.
        #[arg(long)]
        key: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Image file to upload.
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        active: Option<bool>,
    },
}
