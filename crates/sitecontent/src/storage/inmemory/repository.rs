//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use sitecontent_core::content::{
    sort_for_listing, ContentItem, ContentSection, Faq, Ordered, Testimonial,
};
use sitecontent_core::storage::{
    FaqRepository, ItemRepository, RepositoryError, Result, SectionRepository,
    TestimonialRepository, Visibility,
};

type Table<T> = Arc<RwLock<HashMap<Uuid, T>>>;

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access. Clones
/// share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    sections: Table<ContentSection>,
    items: Table<ContentItem>,
    testimonials: Table<Testimonial>,
    faqs: Table<Faq>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn listed<'a, T, I>(rows: I, visibility: Visibility) -> Vec<T>
where
    T: Ordered + Clone + 'a,
    I: Iterator<Item = &'a T>,
{
    let mut rows: Vec<T> = rows
        .filter(|row| visibility.includes(row.is_active()))
        .cloned()
        .collect();
    sort_for_listing(&mut rows);
    rows
}

async fn insert<T: Clone>(
    table: &Table<T>,
    entity_type: &'static str,
    id: Uuid,
    row: &T,
) -> Result<()> {
    let mut rows = table.write().await;
    if rows.contains_key(&id) {
        return Err(RepositoryError::AlreadyExists {
            entity_type,
            id: id.to_string(),
        });
    }
    rows.insert(id, row.clone());
    Ok(())
}

async fn replace<T: Clone>(
    table: &Table<T>,
    entity_type: &'static str,
    id: Uuid,
    row: &T,
) -> Result<()> {
    let mut rows = table.write().await;
    match rows.get_mut(&id) {
        Some(existing) => {
            *existing = row.clone();
            Ok(())
        }
        None => Err(RepositoryError::not_found(entity_type, id)),
    }
}

async fn remove<T>(table: &Table<T>, entity_type: &'static str, id: Uuid) -> Result<()> {
    let mut rows = table.write().await;
    if rows.remove(&id).is_none() {
        return Err(RepositoryError::not_found(entity_type, id));
    }
    Ok(())
}

#[async_trait]
impl SectionRepository for InMemoryRepository {
    async fn list_sections(&self, visibility: Visibility) -> Result<Vec<ContentSection>> {
        let sections = self.sections.read().await;
        Ok(listed(sections.values(), visibility))
    }

    async fn get_section(&self, id: Uuid) -> Result<Option<ContentSection>> {
        let sections = self.sections.read().await;
        Ok(sections.get(&id).cloned())
    }

    async fn get_section_by_key(
        &self,
        key: &str,
        visibility: Visibility,
    ) -> Result<Option<ContentSection>> {
        let sections = self.sections.read().await;
        Ok(listed(sections.values().filter(|s| s.key == key), visibility)
            .into_iter()
            .next())
    }

    async fn create_section(&self, section: &ContentSection) -> Result<()> {
        insert(&self.sections, "ContentSection", section.id, section).await
    }

    async fn update_section(&self, section: &ContentSection) -> Result<()> {
        replace(&self.sections, "ContentSection", section.id, section).await
    }

    async fn delete_section(&self, id: Uuid) -> Result<()> {
        // Lock order: sections, then items.
        let mut sections = self.sections.write().await;
        if sections.remove(&id).is_none() {
            return Err(RepositoryError::not_found("ContentSection", id));
        }
        let mut items = self.items.write().await;
        items.retain(|_, item| item.section_id != id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn list_items(&self, visibility: Visibility) -> Result<Vec<ContentItem>> {
        let items = self.items.read().await;
        Ok(listed(items.values(), visibility))
    }

    async fn list_items_by_section(
        &self,
        section_id: Uuid,
        visibility: Visibility,
    ) -> Result<Vec<ContentItem>> {
        let items = self.items.read().await;
        Ok(listed(
            items.values().filter(|i| i.section_id == section_id),
            visibility,
        ))
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<ContentItem>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn create_item(&self, item: &ContentItem) -> Result<()> {
        let sections = self.sections.read().await;
        if !sections.contains_key(&item.section_id) {
            return Err(RepositoryError::InvalidData(format!(
                "section {} does not exist",
                item.section_id
            )));
        }
        insert(&self.items, "ContentItem", item.id, item).await
    }

    async fn update_item(&self, item: &ContentItem) -> Result<()> {
        let sections = self.sections.read().await;
        if !sections.contains_key(&item.section_id) {
            return Err(RepositoryError::InvalidData(format!(
                "section {} does not exist",
                item.section_id
            )));
        }
        replace(&self.items, "ContentItem", item.id, item).await
    }

    async fn delete_item(&self, id: Uuid) -> Result<()> {
        remove(&self.items, "ContentItem", id).await
    }
}

#[async_trait]
impl TestimonialRepository for InMemoryRepository {
    async fn list_testimonials(&self, visibility: Visibility) -> Result<Vec<Testimonial>> {
        let testimonials = self.testimonials.read().await;
        Ok(listed(testimonials.values(), visibility))
    }

    async fn get_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>> {
        let testimonials = self.testimonials.read().await;
        Ok(testimonials.get(&id).cloned())
    }

    async fn create_testimonial(&self, testimonial: &Testimonial) -> Result<()> {
        insert(&self.testimonials, "Testimonial", testimonial.id, testimonial).await
    }

    async fn update_testimonial(&self, testimonial: &Testimonial) -> Result<()> {
        replace(&self.testimonials, "Testimonial", testimonial.id, testimonial).await
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<()> {
        remove(&self.testimonials, "Testimonial", id).await
    }
}

#[async_trait]
impl FaqRepository for InMemoryRepository {
    async fn list_faqs(&self, visibility: Visibility) -> Result<Vec<Faq>> {
        let faqs = self.faqs.read().await;
        Ok(listed(faqs.values(), visibility))
    }

    async fn get_faq(&self, id: Uuid) -> Result<Option<Faq>> {
        let faqs = self.faqs.read().await;
        Ok(faqs.get(&id).cloned())
    }

    async fn create_faq(&self, faq: &Faq) -> Result<()> {
        insert(&self.faqs, "Faq", faq.id, faq).await
    }

    async fn update_faq(&self, faq: &Faq) -> Result<()> {
        replace(&self.faqs, "Faq", faq.id, faq).await
    }

    async fn delete_faq(&self, id: Uuid) -> Result<()> {
        remove(&self.faqs, "Faq", id).await
    }
}
