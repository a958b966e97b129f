//! Request payloads for content operations.
//!
//! These types are shared between the server and the admin console. The same
//! payload is used for create and update: required fields must be present in
//! both, optional fields left out of an update keep their stored value.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{FieldError, ValidationError};
use super::types::{ContentItem, ContentSection, Faq, Metadata, Testimonial};
use crate::serde::deserialize_patch;

const MAX_TITLE_LEN: usize = 255;
const MAX_KEY_LEN: usize = 100;

/// Payload for creating or updating a content section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPayload {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub key: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
}

impl SectionPayload {
    /// Create a payload with the required fields set.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Build a payload that re-submits every field of an existing section.
    pub fn from_section(section: &ContentSection) -> Self {
        Self {
            key: Some(section.key.clone()),
            title: Some(section.title.clone()),
            content: Some(section.content.clone()),
            metadata: Some(section.metadata.clone()),
            is_active: Some(section.is_active),
            display_order: Some(section.display_order),
            image_url: Some(section.image_url.clone()),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(Some(content.into()));
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = Some(image_url);
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = Some(display_order);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Validate required fields and value ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        match present(self.key.as_deref()) {
            None => errors.push(FieldError::required("key")),
            Some(key) => {
                if key.len() > MAX_KEY_LEN {
                    errors.push(FieldError::new(
                        "key",
                        format!("key must be at most {MAX_KEY_LEN} characters"),
                    ));
                }
                if !is_slug(key) {
                    errors.push(FieldError::new(
                        "key",
                        "key may only contain lowercase letters, digits, '-' and '_'",
                    ));
                }
            }
        }
        check_title("title", self.title.as_deref(), &mut errors);
        check_display_order(self.display_order, &mut errors);
        ValidationError::check(errors)
    }

    /// Convert into a new section after validation.
    pub fn into_section(self) -> Result<ContentSection, ValidationError> {
        self.validate()?;
        let mut section = ContentSection::new(
            self.key.unwrap_or_default(),
            self.title.unwrap_or_default(),
        );
        section.content = self.content.flatten();
        section.metadata = self.metadata.unwrap_or_default();
        section.is_active = self.is_active.unwrap_or(true);
        section.display_order = self.display_order.unwrap_or(0);
        section.image_url = self.image_url.flatten();
        Ok(section)
    }

    /// Apply this payload to an existing section after validation.
    pub fn apply_to(self, section: &mut ContentSection) -> Result<(), ValidationError> {
        self.validate()?;
        section.key = self.key.unwrap_or_default();
        section.title = self.title.unwrap_or_default();
        if let Some(content) = self.content {
            section.content = content;
        }
        if let Some(metadata) = self.metadata {
            section.metadata = metadata;
        }
        if let Some(is_active) = self.is_active {
            section.is_active = is_active;
        }
        if let Some(display_order) = self.display_order {
            section.display_order = display_order;
        }
        if let Some(image_url) = self.image_url {
            section.image_url = image_url;
        }
        section.updated_at = Utc::now();
        Ok(())
    }
}

/// Payload for creating or updating a content item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    /// Kept as a string so a malformed ID is reported as a field error.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub section_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

impl ItemPayload {
    /// Create a payload with the required fields set.
    pub fn new(section_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.to_string()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Build a payload that re-submits every field of an existing item.
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            section_id: Some(item.section_id.to_string()),
            title: Some(item.title.clone()),
            description: Some(item.description.clone()),
            image_url: Some(item.image_url.clone()),
            link_url: Some(item.link_url.clone()),
            metadata: Some(item.metadata.clone()),
            is_active: Some(item.is_active),
            display_order: Some(item.display_order),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = Some(image_url);
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = Some(display_order);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    fn parsed_section_id(&self) -> Option<Uuid> {
        self.section_id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id.trim()).ok())
    }

    /// Validate required fields and value ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        match present(self.section_id.as_deref()) {
            None => errors.push(FieldError::required("section_id")),
            Some(_) if self.parsed_section_id().is_none() => {
                errors.push(FieldError::new("section_id", "section_id must be a valid UUID"));
            }
            Some(_) => {}
        }
        check_title("title", self.title.as_deref(), &mut errors);
        check_display_order(self.display_order, &mut errors);
        ValidationError::check(errors)
    }

    /// Convert into a new item after validation.
    pub fn into_item(self) -> Result<ContentItem, ValidationError> {
        self.validate()?;
        let section_id = self.parsed_section_id().unwrap_or_default();
        let mut item = ContentItem::new(section_id, self.title.unwrap_or_default());
        item.description = self.description.flatten();
        item.image_url = self.image_url.flatten();
        item.link_url = self.link_url.flatten();
        item.metadata = self.metadata.unwrap_or_default();
        item.is_active = self.is_active.unwrap_or(true);
        item.display_order = self.display_order.unwrap_or(0);
        Ok(item)
    }

    /// Apply this payload to an existing item after validation.
    pub fn apply_to(self, item: &mut ContentItem) -> Result<(), ValidationError> {
        self.validate()?;
        item.section_id = self.parsed_section_id().unwrap_or(item.section_id);
        item.title = self.title.unwrap_or_default();
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(image_url) = self.image_url {
            item.image_url = image_url;
        }
        if let Some(link_url) = self.link_url {
            item.link_url = link_url;
        }
        if let Some(metadata) = self.metadata {
            item.metadata = metadata;
        }
        if let Some(is_active) = self.is_active {
            item.is_active = is_active;
        }
        if let Some(display_order) = self.display_order {
            item.display_order = display_order;
        }
        item.updated_at = Utc::now();
        Ok(())
    }
}

/// Payload for creating or updating a testimonial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialPayload {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Option<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

impl TestimonialPayload {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Build a payload that re-submits every field of an existing testimonial.
    pub fn from_testimonial(testimonial: &Testimonial) -> Self {
        Self {
            name: Some(testimonial.name.clone()),
            content: Some(testimonial.content.clone()),
            position: Some(testimonial.position.clone()),
            company: Some(testimonial.company.clone()),
            image_url: Some(testimonial.image_url.clone()),
            rating: Some(testimonial.rating),
            is_active: Some(testimonial.is_active),
            display_order: Some(testimonial.display_order),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        check_title("name", self.name.as_deref(), &mut errors);
        if present(self.content.as_deref()).is_none() {
            errors.push(FieldError::required("content"));
        }
        if let Some(Some(rating)) = self.rating {
            if !(1..=5).contains(&rating) {
                errors.push(FieldError::new("rating", "rating must be between 1 and 5"));
            }
        }
        check_display_order(self.display_order, &mut errors);
        ValidationError::check(errors)
    }

    pub fn into_testimonial(self) -> Result<Testimonial, ValidationError> {
        self.validate()?;
        let mut testimonial =
            Testimonial::new(self.name.unwrap_or_default(), self.content.unwrap_or_default());
        testimonial.position = self.position.flatten();
        testimonial.company = self.company.flatten();
        testimonial.image_url = self.image_url.flatten();
        testimonial.rating = self.rating.flatten();
        testimonial.is_active = self.is_active.unwrap_or(true);
        testimonial.display_order = self.display_order.unwrap_or(0);
        Ok(testimonial)
    }

    pub fn apply_to(self, testimonial: &mut Testimonial) -> Result<(), ValidationError> {
        self.validate()?;
        testimonial.name = self.name.unwrap_or_default();
        testimonial.content = self.content.unwrap_or_default();
        if let Some(position) = self.position {
            testimonial.position = position;
        }
        if let Some(company) = self.company {
            testimonial.company = company;
        }
        if let Some(image_url) = self.image_url {
            testimonial.image_url = image_url;
        }
        if let Some(rating) = self.rating {
            testimonial.rating = rating;
        }
        if let Some(is_active) = self.is_active {
            testimonial.is_active = is_active;
        }
        if let Some(display_order) = self.display_order {
            testimonial.display_order = display_order;
        }
        testimonial.updated_at = Utc::now();
        Ok(())
    }
}

/// Payload for creating or updating a FAQ entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqPayload {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub question: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub answer: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

impl FaqPayload {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            ..Self::default()
        }
    }

    pub fn from_faq(faq: &Faq) -> Self {
        Self {
            question: Some(faq.question.clone()),
            answer: Some(faq.answer.clone()),
            category: Some(faq.category.clone()),
            is_active: Some(faq.is_active),
            display_order: Some(faq.display_order),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        if present(self.question.as_deref()).is_none() {
            errors.push(FieldError::required("question"));
        }
        if present(self.answer.as_deref()).is_none() {
            errors.push(FieldError::required("answer"));
        }
        check_display_order(self.display_order, &mut errors);
        ValidationError::check(errors)
    }

    pub fn into_faq(self) -> Result<Faq, ValidationError> {
        self.validate()?;
        let mut faq = Faq::new(
            self.question.unwrap_or_default(),
            self.answer.unwrap_or_default(),
        );
        faq.category = self.category.flatten();
        faq.is_active = self.is_active.unwrap_or(true);
        faq.display_order = self.display_order.unwrap_or(0);
        Ok(faq)
    }

    pub fn apply_to(self, faq: &mut Faq) -> Result<(), ValidationError> {
        self.validate()?;
        faq.question = self.question.unwrap_or_default();
        faq.answer = self.answer.unwrap_or_default();
        if let Some(category) = self.category {
            faq.category = category;
        }
        if let Some(is_active) = self.is_active {
            faq.is_active = is_active;
        }
        if let Some(display_order) = self.display_order {
            faq.display_order = display_order;
        }
        faq.updated_at = Utc::now();
        Ok(())
    }
}

/// A required string counts as missing when it is blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_title(field: &str, value: Option<&str>, errors: &mut Vec<FieldError>) {
    match present(value) {
        None => errors.push(FieldError::required(field)),
        Some(v) if v.chars().count() > MAX_TITLE_LEN => errors.push(FieldError::new(
            field,
            format!("{field} must be at most {MAX_TITLE_LEN} characters"),
        )),
        Some(_) => {}
    }
}

fn check_display_order(value: Option<i32>, errors: &mut Vec<FieldError>) {
    if matches!(value, Some(order) if order < 0) {
        errors.push(FieldError::new("display_order", "display_order must not be negative"));
    }
}

fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testimonial_resubmit_round_trips_fields() {
        let mut original = Testimonial::new("Ada", "Great service").with_display_order(3);
        original.company = Some("Acme".to_string());
        original.rating = Some(5);

        let mut payload = TestimonialPayload::from_testimonial(&original);
        payload.is_active = Some(false);
        let mut updated = original.clone();
        payload.apply_to(&mut updated).unwrap();

        assert_eq!(updated.company.as_deref(), Some("Acme"));
        assert_eq!(updated.rating, Some(5));
        assert_eq!(updated.display_order, 3);
        assert!(!updated.is_active);
    }

    #[test]
    fn test_section_payload_from_json() {
        let payload: SectionPayload = serde_json::from_str(
            r#"{"key":"hero","title":"Welcome","content":"..","is_active":true,"display_order":0}"#,
        )
        .unwrap();

        let section = payload.into_section().unwrap();
        assert_eq!(section.key, "hero");
        assert_eq!(section.title, "Welcome");
        assert_eq!(section.content.as_deref(), Some(".."));
        assert!(section.is_active);
        assert_eq!(section.display_order, 0);
    }

    #[test]
    fn test_section_payload_reports_all_missing_fields() {
        let payload: SectionPayload = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        let err = payload.validate().unwrap_err();
        assert!(err.has_field("key"));
        assert!(err.has_field("title"));
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_section_key_must_be_slug() {
        let err = SectionPayload::new("Hero Banner", "Title").validate().unwrap_err();
        assert!(err.has_field("key"));
    }

    #[test]
    fn test_negative_display_order_rejected() {
        let err = SectionPayload::new("hero", "Title")
            .with_display_order(-1)
            .validate()
            .unwrap_err();
        assert!(err.has_field("display_order"));
    }

    #[test]
    fn test_blank_title_counts_as_missing() {
        let payload: SectionPayload =
            serde_json::from_str(r#"{"key":"hero","title":"   "}"#).unwrap();
        let err = payload.validate().unwrap_err();
        assert_eq!(err.errors, vec![FieldError::required("title")]);
    }

    #[test]
    fn test_blank_required_fields_fail_before_serialization() {
        let err = ItemPayload::new(Uuid::new_v4(), "  ").validate().unwrap_err();
        assert_eq!(err.errors, vec![FieldError::required("title")]);

        let err = FaqPayload::new("", "Answer").validate().unwrap_err();
        assert!(err.has_field("question"));

        let err = SectionPayload::new(" ", "Title").validate().unwrap_err();
        assert_eq!(err.errors, vec![FieldError::required("key")]);
    }

    #[test]
    fn test_blank_optional_strings_are_kept() {
        let section_id = Uuid::new_v4();
        let payload: ItemPayload = serde_json::from_value(serde_json::json!({
            "section_id": section_id.to_string(),
            "title": "Box",
            "description": "",
            "link_url": ""
        }))
        .unwrap();

        let item = payload.into_item().unwrap();
        assert_eq!(item.description.as_deref(), Some(""));
        assert_eq!(item.link_url.as_deref(), Some(""));
    }

    #[test]
    fn test_section_update_keeps_omitted_optionals() {
        let mut section = ContentSection::new("about", "About")
            .with_content("Original")
            .with_display_order(11);
        section.image_url = Some("https://cdn.example.com/hero.png".to_string());
        let created_at = section.created_at;
        let id = section.id;

        let payload: SectionPayload =
            serde_json::from_str(r#"{"key":"about","title":"About us"}"#).unwrap();
        payload.apply_to(&mut section).unwrap();

        assert_eq!(section.id, id);
        assert_eq!(section.created_at, created_at);
        assert_eq!(section.title, "About us");
        assert_eq!(section.content.as_deref(), Some("Original"));
        assert_eq!(section.display_order, 11);
        assert!(section.image_url.is_some());
    }

    #[test]
    fn test_section_update_null_clears_image() {
        let mut section = ContentSection::new("about", "About");
        section.image_url = Some("https://cdn.example.com/hero.png".to_string());

        let payload: SectionPayload =
            serde_json::from_str(r#"{"key":"about","title":"About","image_url":null}"#).unwrap();
        payload.apply_to(&mut section).unwrap();

        assert_eq!(section.image_url, None);
    }

    #[test]
    fn test_failed_update_leaves_section_untouched() {
        let mut section = ContentSection::new("about", "About");
        let before = section.clone();

        let payload: SectionPayload = serde_json::from_str(r#"{"key":"about"}"#).unwrap();
        assert!(payload.apply_to(&mut section).is_err());
        assert_eq!(section, before);
    }

    #[test]
    fn test_item_payload_requires_title() {
        let section_id = Uuid::new_v4();
        let payload: ItemPayload = serde_json::from_value(serde_json::json!({
            "section_id": section_id.to_string(),
            "description": "no title here"
        }))
        .unwrap();

        let err = payload.validate().unwrap_err();
        assert_eq!(err.errors, vec![FieldError::required("title")]);
    }

    #[test]
    fn test_item_payload_invalid_section_id() {
        let payload: ItemPayload =
            serde_json::from_str(r#"{"section_id":"nope","title":"Box"}"#).unwrap();
        let err = payload.validate().unwrap_err();
        assert!(err.has_field("section_id"));
    }

    #[test]
    fn test_item_payload_into_item() {
        let section_id = Uuid::new_v4();
        let item = ItemPayload::new(section_id, "Feature 1")
            .with_description(Some("Held annually".to_string()))
            .with_display_order(1)
            .into_item()
            .unwrap();

        assert_eq!(item.section_id, section_id);
        assert_eq!(item.display_order, 1);
        assert!(item.is_active);
        assert_eq!(item.description.as_deref(), Some("Held annually"));
    }

    #[test]
    fn test_item_payload_round_trips_existing_item() {
        let item = ContentItem::new(Uuid::new_v4(), "Box")
            .with_display_order(2)
            .with_image_url("https://cdn.example.com/a.png");
        let mut copy = item.clone();

        ItemPayload::from_item(&item).apply_to(&mut copy).unwrap();

        assert_eq!(copy.title, item.title);
        assert_eq!(copy.image_url, item.image_url);
        assert_eq!(copy.display_order, item.display_order);
        assert_eq!(copy.section_id, item.section_id);
    }

    #[test]
    fn test_payload_serialization_skips_untouched_fields() {
        let json = serde_json::to_value(SectionPayload::new("hero", "Hi")).unwrap();
        assert_eq!(json, serde_json::json!({"key": "hero", "title": "Hi"}));

        let json = serde_json::to_value(
            ItemPayload::new(Uuid::nil(), "Box").with_image_url(None),
        )
        .unwrap();
        assert!(json["image_url"].is_null());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_testimonial_rating_range() {
        let mut payload = TestimonialPayload::new("Ana", "Great fair");
        payload.rating = Some(Some(6));
        assert!(payload.validate().unwrap_err().has_field("rating"));

        payload.rating = Some(Some(5));
        let testimonial = payload.into_testimonial().unwrap();
        assert_eq!(testimonial.rating, Some(5));
    }

    #[test]
    fn test_testimonial_requires_name_and_content() {
        let err = TestimonialPayload::default().validate().unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("content"));
    }

    #[test]
    fn test_faq_payload() {
        let err = FaqPayload::default().validate().unwrap_err();
        assert!(err.has_field("question"));
        assert!(err.has_field("answer"));

        let faq = FaqPayload::new("When?", "Every June").into_faq().unwrap();
        assert_eq!(faq.question, "When?");
        assert!(faq.is_active);
    }

    #[test]
    fn test_faq_update_changes_category() {
        let mut faq = Faq::new("Where?", "Downtown");
        let mut payload = FaqPayload::new("Where?", "Downtown hall");
        payload.category = Some(Some("venue".to_string()));

        payload.apply_to(&mut faq).unwrap();

        assert_eq!(faq.answer, "Downtown hall");
        assert_eq!(faq.category.as_deref(), Some("venue"));
    }
}
