use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form key/value metadata attached to sections and items.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A named content block (e.g. "hero", "about") that groups items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub id: Uuid,
    pub key: String,
    pub title: String,
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    pub is_active: bool,
    pub display_order: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentSection {
    /// Creates an active section with the given key and title.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            title: title.into(),
            content: None,
            metadata: Metadata::new(),
            is_active: true,
            display_order: 0,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets a specific ID for this section (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A single content unit belonging to a section.
///
/// `display_order` drives rendering order and doubles as the slot key the
/// admin console uses for fixed layouts such as the four feature boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Creates an active item in the given section.
    pub fn new(section_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            section_id,
            title: title.into(),
            description: None,
            image_url: None,
            link_url: None,
            metadata: Metadata::new(),
            is_active: true,
            display_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets a specific ID for this item (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the creation timestamp (useful for testing tie-breaks).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }
}

/// A customer quote shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub position: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub rating: Option<u8>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Testimonial {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position: None,
            company: None,
            content: content.into(),
            image_url: None,
            rating: None,
            is_active: true,
            display_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }
}

/// A frequently asked question and its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            answer: answer.into(),
            category: None,
            is_active: true,
            display_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }
}

/// Common view over the listing fields every entity shares.
pub trait Ordered {
    fn display_order(&self) -> i32;
    fn created_at(&self) -> DateTime<Utc>;
    fn is_active(&self) -> bool;
}

macro_rules! impl_ordered {
    ($($ty:ty),*) => {
        $(
            impl Ordered for $ty {
                fn display_order(&self) -> i32 {
                    self.display_order
                }

                fn created_at(&self) -> DateTime<Utc> {
                    self.created_at
                }

                fn is_active(&self) -> bool {
                    self.is_active
                }
            }
        )*
    };
}

impl_ordered!(ContentSection, ContentItem, Testimonial, Faq);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_defaults() {
        let section = ContentSection::new("hero", "Welcome");
        assert_eq!(section.key, "hero");
        assert!(section.is_active);
        assert_eq!(section.display_order, 0);
        assert!(section.metadata.is_empty());
        assert_eq!(section.created_at, section.updated_at);
    }

    #[test]
    fn test_item_builder() {
        let section_id = Uuid::new_v4();
        let item = ContentItem::new(section_id, "Box")
            .with_display_order(3)
            .with_image_url("https://cdn.example.com/a.png")
            .with_active(false);

        assert_eq!(item.section_id, section_id);
        assert_eq!(item.display_order, 3);
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.example.com/a.png"));
        assert!(!item.is_active);
    }

    #[test]
    fn test_section_serializes_metadata_as_object() {
        let mut metadata = Metadata::new();
        metadata.insert("mission".into(), serde_json::json!("Connect people"));
        let section = ContentSection::new("about", "About").with_metadata(metadata);

        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["metadata"]["mission"], "Connect people");
        assert_eq!(json["is_active"], true);
    }
}
