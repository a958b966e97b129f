//! Read operations.

use super::ContentClient;
use crate::error::Result;
use sitecontent_core::content::{AllContent, SectionContent};

impl ContentClient {
    /// All active content.
    pub async fn all_content(&self) -> Result<AllContent> {
        let response = self.client.get(self.url("")).send().await?;
        self.handle_response(response, "content").await
    }

    /// All content, including inactive rows.
    pub async fn admin_content(&self) -> Result<AllContent> {
        let response = self.client.get(self.url("/admin")).send().await?;
        self.handle_response(response, "admin content").await
    }

    /// Content for one section key.
    pub async fn section_content(&self, key: &str) -> Result<SectionContent> {
        let response = self
            .client
            .get(self.url(&format!("/section/{key}")))
            .send()
            .await?;
        self.handle_response(response, &format!("section {key}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    #[tokio::test]
    async fn test_section_content_shapes() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/section/faqs")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"success": true, "data": {"faqs": []}}).to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/section/hero")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"success": true, "data": {"section": null, "items": []}}).to_string())
            .create_async()
            .await;

        let client = ContentClient::new(server.url());

        assert_eq!(
            client.section_content("faqs").await.unwrap(),
            SectionContent::Faqs { faqs: vec![] }
        );
        assert_eq!(
            client.section_content("hero").await.unwrap(),
            SectionContent::Section {
                section: None,
                items: vec![]
            }
        );
    }

    #[tokio::test]
    async fn test_all_content_uses_base_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(
                json!({
                    "success": true,
                    "data": {"sections": [], "items": [], "testimonials": [], "faqs": []}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ContentClient::new(format!("{}/", server.url()));
        let content = client.all_content().await.unwrap();

        mock.assert_async().await;
        assert_eq!(content, AllContent::default());
    }
}
