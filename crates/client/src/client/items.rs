//! Content item API operations.

use super::ContentClient;
use crate::error::Result;
use sitecontent_core::content::{ContentItem, ItemPayload};
use uuid::Uuid;

impl ContentClient {
    /// Create a new content item.
    pub async fn create_item(&self, payload: &ItemPayload) -> Result<ContentItem> {
        let response = self
            .client
            .post(self.url("/items"))
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, "content item").await
    }

    /// Update a content item. Required fields must be present in `payload`.
    pub async fn update_item(&self, id: Uuid, payload: &ItemPayload) -> Result<ContentItem> {
        let response = self
            .client
            .put(self.url(&format!("/items/{id}")))
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, &format!("content item {id}"))
            .await
    }

    /// Delete a content item by ID.
    pub async fn delete_item(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/items/{id}")))
            .send()
            .await?;
        self.handle_message_response(response, &format!("content item {id}"))
            .await?;
        Ok(())
    }
}
