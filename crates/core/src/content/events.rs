//! Events stored as items of the `events` section.
//!
//! An event is a plain [`ContentItem`]; its date, venue and contact details
//! live in the item's metadata under the keys of [`EventDetails`].

use serde::Serialize;
use serde_json::Value;

use super::types::{ContentItem, Metadata};

/// Key of the section whose items are events.
pub const EVENTS_SECTION_KEY: &str = "events";

/// Structured event fields kept in item metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventDetails {
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub organizer: Option<String>,
    pub contact_email: Option<String>,
    pub guests: Option<String>,
}

impl EventDetails {
    /// Reads the event fields of `metadata`. Non-string values are ignored.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let get = |key: &str| metadata.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            date: get("date"),
            time: get("time"),
            location: get("location"),
            category: get("category"),
            organizer: get("organizer"),
            contact_email: get("contact_email"),
            guests: get("guests"),
        }
    }

    fn fields(&self) -> [(&'static str, &Option<String>); 7] {
        [
            ("date", &self.date),
            ("time", &self.time),
            ("location", &self.location),
            ("category", &self.category),
            ("organizer", &self.organizer),
            ("contact_email", &self.contact_email),
            ("guests", &self.guests),
        ]
    }

    /// Writes the fields that are set into `metadata`. Unset fields and
    /// keys that are not event fields are left alone.
    pub fn merge_into(&self, metadata: &mut Metadata) {
        for (key, value) in self.fields() {
            if let Some(value) = value {
                metadata.insert(key.to_string(), Value::String(value.clone()));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }
}

/// Which events a listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

/// Search and status filter over the events list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub search: Option<String>,
    pub status: StatusFilter,
}

impl EventFilter {
    /// Case-insensitive search over title, description and location.
    pub fn matches(&self, event: &ContentItem) -> bool {
        let status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => event.is_active,
            StatusFilter::Inactive => !event.is_active,
        };
        if !status {
            return false;
        }

        let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) else {
            return true;
        };
        let term = term.to_lowercase();
        let contains = |value: Option<&str>| value.is_some_and(|v| v.to_lowercase().contains(&term));

        contains(Some(&event.title))
            || contains(event.description.as_deref())
            || contains(event.metadata.get("location").and_then(Value::as_str))
    }
}

/// Counts shown above the events list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl EventStats {
    pub fn of(events: &[ContentItem]) -> Self {
        let active = events.iter().filter(|e| e.is_active).count();
        Self {
            total: events.len(),
            active,
            inactive: events.len() - active,
        }
    }
}
