use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{ContentItem, ContentSection, Faq, Testimonial};

/// The section keys the public site knows about.
///
/// Any other key is `Custom` and resolves to the section with that key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKey {
    Hero,
    About,
    Features,
    Events,
    Testimonials,
    Faqs,
    Custom(String),
}

impl SectionKey {
    pub fn as_str(&self) -> &str {
        match self {
            SectionKey::Hero => "hero",
            SectionKey::About => "about",
            SectionKey::Features => "features",
            SectionKey::Events => "events",
            SectionKey::Testimonials => "testimonials",
            SectionKey::Faqs => "faqs",
            SectionKey::Custom(key) => key,
        }
    }
}

impl From<&str> for SectionKey {
    fn from(key: &str) -> Self {
        match key {
            "hero" => SectionKey::Hero,
            "about" => SectionKey::About,
            "features" => SectionKey::Features,
            "events" => SectionKey::Events,
            "testimonials" => SectionKey::Testimonials,
            "faqs" => SectionKey::Faqs,
            other => SectionKey::Custom(other.to_string()),
        }
    }
}

/// All four content collections in listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllContent {
    pub sections: Vec<ContentSection>,
    pub items: Vec<ContentItem>,
    pub testimonials: Vec<Testimonial>,
    pub faqs: Vec<Faq>,
}

/// Content for one section key. The shape depends on the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Testimonials {
        testimonials: Vec<Testimonial>,
    },
    Faqs {
        faqs: Vec<Faq>,
    },
    Section {
        section: Option<ContentSection>,
        items: Vec<ContentItem>,
    },
}

/// JSON envelope for every response: `{success, message?, data?, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// A successful response carrying only a message.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// A failed response with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
