use async_trait::async_trait;
use uuid::Uuid;

use crate::content::{ContentItem, ContentSection, Faq, Testimonial};

use super::{Result, Visibility};

// Listings are returned in listing order: display_order ascending, then
// created_at descending. Update and delete return `NotFound` for a missing id.

/// Repository for content section operations.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Lists sections in listing order.
    async fn list_sections(&self, visibility: Visibility) -> Result<Vec<ContentSection>>;

    /// Gets a section by its ID.
    async fn get_section(&self, id: Uuid) -> Result<Option<ContentSection>>;

    /// Gets a section by its key. Inactive sections are skipped unless
    /// `visibility` is `All`.
    async fn get_section_by_key(
        &self,
        key: &str,
        visibility: Visibility,
    ) -> Result<Option<ContentSection>>;

    /// Creates a new section.
    async fn create_section(&self, section: &ContentSection) -> Result<()>;

    /// Updates an existing section.
    async fn update_section(&self, section: &ContentSection) -> Result<()>;

    /// Deletes a section and every item that belongs to it.
    async fn delete_section(&self, id: Uuid) -> Result<()>;
}

/// Repository for content item operations.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Lists items across all sections in listing order.
    async fn list_items(&self, visibility: Visibility) -> Result<Vec<ContentItem>>;

    /// Lists the items of one section in listing order.
    async fn list_items_by_section(
        &self,
        section_id: Uuid,
        visibility: Visibility,
    ) -> Result<Vec<ContentItem>>;

    /// Gets an item by its ID.
    async fn get_item(&self, id: Uuid) -> Result<Option<ContentItem>>;

    /// Creates a new item. Fails with `InvalidData` if the section is unknown.
    async fn create_item(&self, item: &ContentItem) -> Result<()>;

    /// Updates an existing item.
    async fn update_item(&self, item: &ContentItem) -> Result<()>;

    /// Deletes an item by its ID.
    async fn delete_item(&self, id: Uuid) -> Result<()>;
}

/// Repository for testimonial operations.
#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn list_testimonials(&self, visibility: Visibility) -> Result<Vec<Testimonial>>;

    async fn get_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>>;

    async fn create_testimonial(&self, testimonial: &Testimonial) -> Result<()>;

    async fn update_testimonial(&self, testimonial: &Testimonial) -> Result<()>;

    async fn delete_testimonial(&self, id: Uuid) -> Result<()>;
}

/// Repository for FAQ operations.
#[async_trait]
pub trait FaqRepository: Send + Sync {
    async fn list_faqs(&self, visibility: Visibility) -> Result<Vec<Faq>>;

    async fn get_faq(&self, id: Uuid) -> Result<Option<Faq>>;

    async fn create_faq(&self, faq: &Faq) -> Result<()>;

    async fn update_faq(&self, faq: &Faq) -> Result<()>;

    async fn delete_faq(&self, id: Uuid) -> Result<()>;
}
