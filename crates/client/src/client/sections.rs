//! Content section API operations.

use super::ContentClient;
use crate::error::Result;
use sitecontent_core::content::{ContentSection, SectionPayload};
use uuid::Uuid;

impl ContentClient {
    /// Create a new content section.
    pub async fn create_section(&self, payload: &SectionPayload) -> Result<ContentSection> {
        let response = self
            .client
            .post(self.url("/sections"))
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, "content section").await
    }

    /// Update a content section. Required fields must be present in `payload`.
    pub async fn update_section(&self, id: Uuid, payload: &SectionPayload) -> Result<ContentSection> {
        let response = self
            .client
            .put(self.url(&format!("/sections/{id}")))
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, &format!("content section {id}"))
            .await
    }

    /// Delete a content section by ID.
    pub async fn delete_section(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/sections/{id}")))
            .send()
            .await?;
        self.handle_message_response(response, &format!("content section {id}"))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_delete_section_accepts_message_envelope() {
        let mut server = Server::new_async().await;
        let id = Uuid::new_v4();
        let mock = server
            .mock("DELETE", format!("/sections/{id}").as_str())
            .with_status(200)
            .with_body(r#"{"success":true,"message":"Content section deleted successfully"}"#)
            .create_async()
            .await;

        let client = ContentClient::new(server.url());
        client.delete_section(id).await.unwrap();

        mock.assert_async().await;
    }
}
