//! Events CLI commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sitecontent_core::content::{EventDetails, StatusFilter};
use uuid::Uuid;

/// Events section management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Which events `list` shows.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatusArg {
    #[default]
    All,
    Active,
    Inactive,
}

impl From<StatusArg> for StatusFilter {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::All => StatusFilter::All,
            StatusArg::Active => StatusFilter::Active,
            StatusArg::Inactive => StatusFilter::Inactive,
        }
    }
}

/// Event fields kept in item metadata.
#[derive(Debug, Args)]
pub struct DetailsArgs {
    /// Event date, e.g. 2025-06-01.
    #[arg(long)]
    pub date: Option<String>,
    /// Start time, e.g. 18:30.
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub organizer: Option<String>,
    #[arg(long)]
    pub contact_email: Option<String>,
    /// Expected number of guests.
    #[arg(long)]
    pub guests: Option<String>,
}

impl From<DetailsArgs> for EventDetails {
    fn from(args: DetailsArgs) -> Self {
        Self {
            date: args.date,
            time: args.time,
            location: args.location,
            category: args.category,
            organizer: args.organizer,
            contact_email: args.contact_email,
            guests: args.guests,
        }
    }
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List events with their counts.
    List {
        /// Case-insensitive match on title, description or location.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
    },
    /// Create an event at the end of the list.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        #[command(flatten)]
        details: DetailsArgs,
        /// Image file to upload.
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        display_order: Option<i32>,
        /// Create the event hidden.
        #[arg(long)]
        inactive: bool,
    },
    /// Update an event. Omitted fields keep their value.
    Update {
        /// Event ID.
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        #[command(flatten)]
        details: DetailsArgs,
        /// Image file to upload; the current image is deleted.
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        display_order: Option<i32>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete an event. Its image is kept.
    Delete {
        /// Event ID.
        id: Uuid,
    },
}
