//! Content service: validation and aggregation on top of the store.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use sitecontent_core::content::{
    AllContent, ContentItem, ContentSection, Faq, FaqPayload, ItemPayload, SectionContent,
    SectionKey, SectionPayload, Testimonial, TestimonialPayload, ValidationError,
};
use sitecontent_core::storage::{RepositoryError, Visibility};

use crate::store::ContentStore;

/// Errors returned by write operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Treats a `NotFound` from the store as an absent row.
fn found<T>(result: Result<T, RepositoryError>) -> Result<Option<T>, RepositoryError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Service over an open content store.
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    // ==================== Reads ====================

    /// All active content. The four collections are fetched concurrently.
    pub async fn get_all_content(&self) -> Result<AllContent, RepositoryError> {
        self.collect(Visibility::Active).await
    }

    /// All content including inactive rows.
    pub async fn get_admin_content(&self) -> Result<AllContent, RepositoryError> {
        self.collect(Visibility::All).await
    }

    async fn collect(&self, visibility: Visibility) -> Result<AllContent, RepositoryError> {
        let (sections, items, testimonials, faqs) = tokio::try_join!(
            self.store.list_sections(visibility),
            self.store.list_items(visibility),
            self.store.list_testimonials(visibility),
            self.store.list_faqs(visibility),
        )?;

        Ok(AllContent {
            sections,
            items,
            testimonials,
            faqs,
        })
    }

    /// Public content for one section key.
    pub async fn get_section_content(
        &self,
        key: &SectionKey,
    ) -> Result<SectionContent, RepositoryError> {
        match key {
            SectionKey::Testimonials => Ok(SectionContent::Testimonials {
                testimonials: self.store.list_testimonials(Visibility::Active).await?,
            }),
            SectionKey::Faqs => Ok(SectionContent::Faqs {
                faqs: self.store.list_faqs(Visibility::Active).await?,
            }),
            SectionKey::Hero
            | SectionKey::About
            | SectionKey::Features
            | SectionKey::Events
            | SectionKey::Custom(_) => {
                let section = self
                    .store
                    .get_section_by_key(key.as_str(), Visibility::Active)
                    .await?;
                let items = match &section {
                    Some(section) => {
                        self.store
                            .list_items_by_section(section.id, Visibility::Active)
                            .await?
                    }
                    None => Vec::new(),
                };
                Ok(SectionContent::Section { section, items })
            }
        }
    }

    // ==================== Sections ====================

    pub async fn create_section(&self, payload: SectionPayload) -> ServiceResult<ContentSection> {
        let section = payload.into_section()?;
        self.store.create_section(&section).await?;
        tracing::info!(id = %section.id, key = %section.key, "Created section");
        Ok(section)
    }

    /// Validates before looking the row up. Returns `None` if no section has
    /// this ID.
    pub async fn update_section(
        &self,
        id: Uuid,
        payload: SectionPayload,
    ) -> ServiceResult<Option<ContentSection>> {
        payload.validate()?;
        let Some(mut section) = self.store.get_section(id).await? else {
            return Ok(None);
        };
        payload.apply_to(&mut section)?;
        Ok(found(self.store.update_section(&section).await)?.map(|()| section))
    }

    /// Returns false if no section has this ID.
    pub async fn delete_section(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(found(self.store.delete_section(id).await)?.is_some())
    }

    // ==================== Items ====================

    pub async fn create_item(&self, payload: ItemPayload) -> ServiceResult<ContentItem> {
        let item = payload.into_item()?;
        self.store.create_item(&item).await?;
        tracing::info!(id = %item.id, section_id = %item.section_id, "Created item");
        Ok(item)
    }

    pub async fn update_item(
        &self,
        id: Uuid,
        payload: ItemPayload,
    ) -> ServiceResult<Option<ContentItem>> {
        payload.validate()?;
        let Some(mut item) = self.store.get_item(id).await? else {
            return Ok(None);
        };
        payload.apply_to(&mut item)?;
        Ok(found(self.store.update_item(&item).await)?.map(|()| item))
    }

    pub async fn delete_item(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(found(self.store.delete_item(id).await)?.is_some())
    }

    // ==================== Testimonials ====================

    pub async fn create_testimonial(
        &self,
        payload: TestimonialPayload,
    ) -> ServiceResult<Testimonial> {
        let testimonial = payload.into_testimonial()?;
        self.store.create_testimonial(&testimonial).await?;
        Ok(testimonial)
    }

    pub async fn update_testimonial(
        &self,
        id: Uuid,
        payload: TestimonialPayload,
    ) -> ServiceResult<Option<Testimonial>> {
        payload.validate()?;
        let Some(mut testimonial) = self.store.get_testimonial(id).await? else {
            return Ok(None);
        };
        payload.apply_to(&mut testimonial)?;
        Ok(found(self.store.update_testimonial(&testimonial).await)?.map(|()| testimonial))
    }

    pub async fn delete_testimonial(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(found(self.store.delete_testimonial(id).await)?.is_some())
    }

    // ==================== FAQs ====================

    pub async fn create_faq(&self, payload: FaqPayload) -> ServiceResult<Faq> {
        let faq = payload.into_faq()?;
        self.store.create_faq(&faq).await?;
        Ok(faq)
    }

    pub async fn update_faq(&self, id: Uuid, payload: FaqPayload) -> ServiceResult<Option<Faq>> {
        payload.validate()?;
        let Some(mut faq) = self.store.get_faq(id).await? else {
            return Ok(None);
        };
        payload.apply_to(&mut faq)?;
        Ok(found(self.store.update_faq(&faq).await)?.map(|()| faq))
    }

    pub async fn delete_faq(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(found(self.store.delete_faq(id).await)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecontent_core::storage::{
        FaqRepository, ItemRepository, SectionRepository, TestimonialRepository,
    };
    use crate::storage::inmemory::InMemoryRepository;

    fn service() -> (ContentService, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        (ContentService::new(Arc::new(repo.clone())), repo)
    }

    #[tokio::test]
    async fn test_all_content_is_active_only() {
        let (service, repo) = service();
        let section = ContentSection::new("hero", "Hero");
        repo.create_section(&section).await.unwrap();
        repo.create_section(&ContentSection::new("draft", "Draft").with_active(false))
            .await
            .unwrap();
        repo.create_item(&ContentItem::new(section.id, "hidden").with_active(false))
            .await
            .unwrap();
        repo.create_faq(&Faq::new("Q", "A").with_active(false))
            .await
            .unwrap();
        repo.create_testimonial(&Testimonial::new("Ana", "Hi"))
            .await
            .unwrap();

        let public = service.get_all_content().await.unwrap();
        assert_eq!(public.sections.len(), 1);
        assert!(public.items.is_empty());
        assert!(public.faqs.is_empty());
        assert_eq!(public.testimonials.len(), 1);

        let admin = service.get_admin_content().await.unwrap();
        assert_eq!(admin.sections.len(), 2);
        assert_eq!(admin.items.len(), 1);
        assert_eq!(admin.faqs.len(), 1);
    }

    #[tokio::test]
    async fn test_section_content_shapes() {
        let (service, _) = service();
        let hero = service
            .create_section(SectionPayload::new("hero", "Welcome"))
            .await
            .unwrap();
        service
            .create_item(ItemPayload::new(hero.id, "CTA"))
            .await
            .unwrap();

        match service.get_section_content(&SectionKey::Hero).await.unwrap() {
            SectionContent::Section { section, items } => {
                assert_eq!(section.map(|s| s.id), Some(hero.id));
                assert_eq!(items.len(), 1);
            }
            other => panic!("unexpected shape: {other:?}"),
        }

        assert_eq!(
            service
                .get_section_content(&SectionKey::from("sponsors"))
                .await
                .unwrap(),
            SectionContent::Section {
                section: None,
                items: Vec::new()
            }
        );
        assert_eq!(
            service
                .get_section_content(&SectionKey::Faqs)
                .await
                .unwrap(),
            SectionContent::Faqs { faqs: Vec::new() }
        );
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let (service, _) = service();
        let result = service
            .update_section(Uuid::new_v4(), SectionPayload::new("hero", "Hero"))
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(!service.delete_faq(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_store_unmodified() {
        let (service, repo) = service();
        let section = service
            .create_section(SectionPayload::new("about", "About"))
            .await
            .unwrap();
        let item = service
            .create_item(ItemPayload::new(section.id, "Box 1"))
            .await
            .unwrap();

        let mut payload = ItemPayload::from_item(&item);
        payload.title = None;
        let result = service.update_item(item.id, payload).await;

        assert!(matches!(result, Err(ServiceError::Validation(ref e)) if e.has_field("title")));
        assert_eq!(repo.get_item(item.id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn test_item_with_unknown_section_is_rejected() {
        let (service, _) = service();
        let result = service
            .create_item(ItemPayload::new(Uuid::new_v4(), "orphan"))
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::InvalidData(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete_section_reports_removal() {
        let (service, _) = service();
        let section = service
            .create_section(SectionPayload::new("events", "Events"))
            .await
            .unwrap();

        assert!(service.delete_section(section.id).await.unwrap());
        assert!(!service.delete_section(section.id).await.unwrap());
    }
}
