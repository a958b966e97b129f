//! FAQ API operations.

use super::ContentClient;
use crate::error::Result;
use sitecontent_core::content::{Faq, FaqPayload};
use uuid::Uuid;

impl ContentClient {
    /// Create a new FAQ.
    pub async fn create_faq(&self, payload: &FaqPayload) -> Result<Faq> {
        let response = self
            .client
            .post(self.url("/faqs"))
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, "FAQ").await
    }

    /// Update a FAQ. Required fields must be present in `payload`.
    pub async fn update_faq(&self, id: Uuid, payload: &FaqPayload) -> Result<Faq> {
        let response = self
            .client
            .put(self.url(&format!("/faqs/{id}")))
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, &format!("FAQ {id}"))
            .await
    }

    /// Delete a FAQ by ID.
    pub async fn delete_faq(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/faqs/{id}")))
            .send()
            .await?;
        self.handle_message_response(response, &format!("FAQ {id}"))
            .await?;
        Ok(())
    }
}
