//! Testimonial CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Testimonial management commands.
#[derive(Debug, Parser)]
pub struct TestimonialsCommand {
    #[command(subcommand)]
    pub action: TestimonialsAction,
}

/// Available testimonial actions.
#[derive(Debug, Subcommand)]
pub enum TestimonialsAction {
    /// Create a new testimonial.
    Create {
        /// Author name.
        #[arg(long)]
        name: String,
        /// Quote text.
        #[arg(long)]
        content: String,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        company: Option<String>,
        /// Rating from 1 to 5.
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        display_order: Option<i32>,
    },
    /// Update a testimonial. Omitted fields keep their value.
    Update {
        /// Testimonial ID.
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a testimonial.
    Delete {
        /// Testimonial ID.
        id: Uuid,
    },
}
