//! FAQ CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// FAQ management commands.
#[derive(Debug, Parser)]
pub struct FaqsCommand {
    #[command(subcommand)]
    pub action: FaqsAction,
}

/// Available FAQ actions.
#[derive(Debug, Subcommand)]
pub enum FaqsAction {
    /// Create a new FAQ.
    Create {
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        display_order: Option<i32>,
    },
    /// Update a FAQ. Omitted fields keep their value.
    Update {
        /// FAQ ID.
        id: Uuid,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a FAQ.
    Delete {
        /// FAQ ID.
        id: Uuid,
    },
}
