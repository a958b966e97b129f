use async_trait::async_trait;
use uuid::Uuid;

use sitecontent_core::content::{
    AllContent, ContentItem, ContentSection, Faq, FaqPayload, ItemPayload, SectionContent,
    SectionPayload, Testimonial, TestimonialPayload,
};

use super::ContentClient;
use crate::error::Result;

/// The content API as seen by the admin console.
///
/// [`ContentClient`] talks HTTP; tests substitute an in-process fake.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn all_content(&self) -> Result<AllContent>;
    async fn admin_content(&self) -> Result<AllContent>;
    async fn section_content(&self, key: &str) -> Result<SectionContent>;

    async fn create_section(&self, payload: &SectionPayload) -> Result<ContentSection>;
    async fn update_section(&self, id: Uuid, payload: &SectionPayload) -> Result<ContentSection>;
    async fn delete_section(&self, id: Uuid) -> Result<()>;

    async fn create_item(&self, payload: &ItemPayload) -> Result<ContentItem>;
    async fn update_item(&self, id: Uuid, payload: &ItemPayload) -> Result<ContentItem>;
    async fn delete_item(&self, id: Uuid) -> Result<()>;

    async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<Testimonial>;
    async fn update_testimonial(
        &self,
        id: Uuid,
        payload: &TestimonialPayload,
    ) -> Result<Testimonial>;
    async fn delete_testimonial(&self, id: Uuid) -> Result<()>;

    async fn create_faq(&self, payload: &FaqPayload) -> Result<Faq>;
    async fn update_faq(&self, id: Uuid, payload: &FaqPayload) -> Result<Faq>;
    async fn delete_faq(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
impl ContentApi for ContentClient {
    async fn all_content(&self) -> Result<AllContent> {
        ContentClient::all_content(self).await
    }

    async fn admin_content(&self) -> Result<AllContent> {
        ContentClient::admin_content(self).await
    }

    async fn section_content(&self, key: &str) -> Result<SectionContent> {
        ContentClient::section_content(self, key).await
    }

    async fn create_section(&self, payload: &SectionPayload) -> Result<ContentSection> {
        ContentClient::create_section(self, payload).await
    }

    async fn update_section(&self, id: Uuid, payload: &SectionPayload) -> Result<ContentSection> {
        ContentClient::update_section(self, id, payload).await
    }

    async fn delete_section(&self, id: Uuid) -> Result<()> {
        ContentClient::delete_section(self, id).await
    }

    async fn create_item(&self, payload: &ItemPayload) -> Result<ContentItem> {
        ContentClient::create_item(self, payload).await
    }

    async fn update_item(&self, id: Uuid, payload: &ItemPayload) -> Result<ContentItem> {
        ContentClient::update_item(self, id, payload).await
    }

    async fn delete_item(&self, id: Uuid) -> Result<()> {
        ContentClient::delete_item(self, id).await
    }

    async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<Testimonial> {
        ContentClient::create_testimonial(self, payload).await
    }

    async fn update_testimonial(
        &self,
        id: Uuid,
        payload: &TestimonialPayload,
    ) -> Result<Testimonial> {
        ContentClient::update_testimonial(self, id, payload).await
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<()> {
        ContentClient::delete_testimonial(self, id).await
    }

    async fn create_faq(&self, payload: &FaqPayload) -> Result<Faq> {
        ContentClient::create_faq(self, payload).await
    }

    async fn update_faq(&self, id: Uuid, payload: &FaqPayload) -> Result<Faq> {
        ContentClient::update_faq(self, id, payload).await
    }

    async fn delete_faq(&self, id: Uuid) -> Result<()> {
        ContentClient::delete_faq(self, id).await
    }
}
