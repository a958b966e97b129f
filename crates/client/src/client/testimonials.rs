//! Testimonial API operations.

use super::ContentClient;
use crate::error::Result;
use sitecontent_core::content::{Testimonial, TestimonialPayload};
use uuid::Uuid;

impl ContentClient {
    /// Create a new testimonial.
    pub async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<Testimonial> {
        let response = self
            .client
            .post(self.url("/testimonials"))
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, "testimonial").await
    }

    /// Update a testimonial. Required fields must be present in `payload`.
    pub async fn update_testimonial(&self, id: Uuid, payload: &TestimonialPayload) -> Result<Testimonial> {
        let response = self
            .client
            .put(self.url(&format!("/testimonials/{id}")))
            .json(payload)
            .send()
            .await?;
        self.handle_response(response, &format!("testimonial {id}"))
            .await
    }

    /// Delete a testimonial by ID.
    pub async fn delete_testimonial(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/testimonials/{id}")))
            .send()
            .await?;
        self.handle_message_response(response, &format!("testimonial {id}"))
            .await?;
        Ok(())
    }
}
