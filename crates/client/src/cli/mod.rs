//! CLI command definitions.

pub mod content;
pub mod events;
pub mod faqs;
pub mod items;
pub mod section;
pub mod sections;
pub mod slots;
pub mod testimonials;

use clap::{Parser, Subcommand, ValueEnum};
use sitecontent_core::content::Metadata;

use crate::client::DEFAULT_BASE_URL;
use crate::media::DEFAULT_MEDIA_URL;

/// Admin CLI for the sitecontent API.
#[derive(Debug, Parser)]
#[command(name = "sitecontent-admin")]
#[command(about = "Admin CLI for the sitecontent API", long_about = None)]
pub struct Cli {
    /// API base URL, including the route prefix.
    #[arg(long, env = "SITECONTENT_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Media upload endpoint.
    #[arg(long, env = "SITECONTENT_MEDIA_URL", default_value = DEFAULT_MEDIA_URL)]
    pub media_url: String,

    /// How long notifications stay visible, in milliseconds.
    #[arg(long, env = "NOTIFICATION_TTL_MS", default_value = "3000")]
    pub notification_ttl_ms: u64,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read content.
    Content(content::ContentCommand),
    /// Content section management.
    Sections(sections::SectionsCommand),
    /// Content item management.
    Items(items::ItemsCommand),
    /// Testimonial management.
    Testimonials(testimonials::TestimonialsCommand),
    /// FAQ management.
    Faqs(faqs::FaqsCommand),
    /// Fixed-layout slots of a section (e.g. the about page feature boxes).
    Slots(slots::SlotsCommand),
    /// Section text and image.
    Section(section::SectionCommand),
    /// Events section management.
    Events(events::EventsCommand),
}

/// Parses a `--metadata` argument. Only JSON objects are accepted.
pub fn parse_metadata(value: &str) -> Result<Metadata, String> {
    match serde_json::from_str(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err("metadata must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid metadata JSON: {e}")),
    }
}
