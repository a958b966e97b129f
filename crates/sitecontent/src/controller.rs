//! Controller: turns a resolved operation into a service call and wraps the
//! result in the JSON envelope.

use axum::http::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use sitecontent_core::content::{ApiResponse, FieldError, SectionKey, ValidationError};
use sitecontent_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::dispatch::{DispatchResponse, Operation};
use crate::service::{ContentService, ServiceError};

/// Errors a controller turns into an error envelope.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}: {source}")]
    Store {
        message: String,
        #[source]
        source: RepositoryError,
    },
}

impl ControllerError {
    fn store(message: impl Into<String>) -> impl FnOnce(RepositoryError) -> Self {
        let message = message.into();
        move |source| ControllerError::Store { message, source }
    }

    /// Builds the error envelope for this error.
    pub fn into_response(self) -> DispatchResponse {
        match self {
            ControllerError::BadRequest(message) => DispatchResponse::envelope(
                StatusCode::BAD_REQUEST,
                &ApiResponse::<Value>::failure(message),
            ),
            ControllerError::InvalidBody(e) => DispatchResponse::envelope(
                StatusCode::BAD_REQUEST,
                &ApiResponse::<Value>::failure("Invalid request body").with_error(e.to_string()),
            ),
            ControllerError::Validation(e) => DispatchResponse::envelope(
                StatusCode::BAD_REQUEST,
                &ApiResponse::<Vec<FieldError>>::failure("Validation failed")
                    .with_error(e.to_string())
                    .with_data(e.errors),
            ),
            ControllerError::NotFound(message) => DispatchResponse::envelope(
                StatusCode::NOT_FOUND,
                &ApiResponse::<Value>::failure(message),
            ),
            ControllerError::Store { message, source } => {
                let status = StatusCode::from_u16(repository_error_to_status_code(&source))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!(error = %source, "{message}");
                } else {
                    tracing::warn!(error = %source, "{message}");
                }
                DispatchResponse::envelope(
                    status,
                    &ApiResponse::<Value>::failure(message).with_error(source.to_string()),
                )
            }
        }
    }
}

/// Response wording for one entity type.
struct Entity {
    /// "Content section created successfully", "Content section not found".
    name: &'static str,
    /// "Section ID is required".
    id_label: &'static str,
    /// "Failed to create content section".
    noun: &'static str,
}

const SECTION: Entity = Entity {
    name: "Content section",
    id_label: "Section",
    noun: "content section",
};

const ITEM: Entity = Entity {
    name: "Content item",
    id_label: "Item",
    noun: "content item",
};

const TESTIMONIAL: Entity = Entity {
    name: "Testimonial",
    id_label: "Testimonial",
    noun: "testimonial",
};

const FAQ: Entity = Entity {
    name: "FAQ",
    id_label: "FAQ",
    noun: "FAQ",
};

impl Entity {
    /// Parses the ID parameter. A missing or blank ID is a bad request; an ID
    /// that is not a UUID cannot name any row and is reported as not found.
    fn id(&self, param: Option<&str>) -> Result<Uuid, ControllerError> {
        let raw = param.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(ControllerError::BadRequest(format!(
                "{} ID is required",
                self.id_label
            )));
        }
        Uuid::parse_str(raw).map_err(|_| self.not_found())
    }

    fn not_found(&self) -> ControllerError {
        ControllerError::NotFound(format!("{} not found", self.name))
    }

    fn failed(&self, action: &str) -> impl FnOnce(ServiceError) -> ControllerError {
        let message = format!("Failed to {action} {}", self.noun);
        move |error| match error {
            ServiceError::Validation(e) => ControllerError::Validation(e),
            ServiceError::Repository(source) => ControllerError::Store { message, source },
        }
    }

    fn created<T: Serialize>(&self, value: &T) -> DispatchResponse {
        DispatchResponse::envelope(
            StatusCode::CREATED,
            &ApiResponse::ok(value).with_message(format!("{} created successfully", self.name)),
        )
    }

    fn updated<T: Serialize>(&self, value: Option<T>) -> Result<DispatchResponse, ControllerError> {
        let value = value.ok_or_else(|| self.not_found())?;
        Ok(DispatchResponse::envelope(
            StatusCode::OK,
            &ApiResponse::ok(value).with_message(format!("{} updated successfully", self.name)),
        ))
    }

    fn deleted(&self, removed: bool) -> Result<DispatchResponse, ControllerError> {
        if !removed {
            return Err(self.not_found());
        }
        Ok(DispatchResponse::envelope(
            StatusCode::OK,
            &ApiResponse::<Value>::done(format!("{} deleted successfully", self.name)),
        ))
    }
}

/// Parses a JSON body. A missing or empty body is read as `{}`.
fn parse_body<T: DeserializeOwned>(body: Option<&str>) -> Result<T, ControllerError> {
    let body = body.map(str::trim).filter(|b| !b.is_empty()).unwrap_or("{}");
    Ok(serde_json::from_str(body)?)
}

fn ok<T: Serialize>(value: &T) -> DispatchResponse {
    DispatchResponse::envelope(StatusCode::OK, &ApiResponse::ok(value))
}

/// Handles one resolved operation against an open store.
pub struct Controller {
    service: ContentService,
}

impl Controller {
    pub fn new(service: ContentService) -> Self {
        Self { service }
    }

    pub async fn handle(
        &self,
        operation: Operation,
        param: Option<String>,
        body: Option<String>,
    ) -> Result<DispatchResponse, ControllerError> {
        let service = &self.service;
        let param = param.as_deref();
        let body = body.as_deref();

        match operation {
            Operation::GetAllContent => {
                let content = service
                    .get_all_content()
                    .await
                    .map_err(ControllerError::store("Failed to fetch content"))?;
                Ok(ok(&content))
            }
            Operation::GetSectionContent => {
                let key = param.map(str::trim).unwrap_or_default();
                if key.is_empty() {
                    return Err(ControllerError::BadRequest(
                        "Section key is required".to_string(),
                    ));
                }
                let content = service
                    .get_section_content(&SectionKey::from(key))
                    .await
                    .map_err(ControllerError::store("Failed to fetch content"))?;
                Ok(ok(&content))
            }
            Operation::GetAdminContent => {
                let content = service
                    .get_admin_content()
                    .await
                    .map_err(ControllerError::store("Failed to fetch content for admin"))?;
                Ok(ok(&content))
            }

            Operation::CreateSection => {
                let section = service
                    .create_section(parse_body(body)?)
                    .await
                    .map_err(SECTION.failed("create"))?;
                Ok(SECTION.created(&section))
            }
            Operation::UpdateSection => {
                let id = SECTION.id(param)?;
                let section = service
                    .update_section(id, parse_body(body)?)
                    .await
                    .map_err(SECTION.failed("update"))?;
                SECTION.updated(section)
            }
            Operation::DeleteSection => {
                let id = SECTION.id(param)?;
                let removed = service
                    .delete_section(id)
                    .await
                    .map_err(SECTION.failed("delete"))?;
                SECTION.deleted(removed)
            }

            Operation::CreateItem => {
                let item = service
                    .create_item(parse_body(body)?)
                    .await
                    .map_err(ITEM.failed("create"))?;
                Ok(ITEM.created(&item))
            }
            Operation::UpdateItem => {
                let id = ITEM.id(param)?;
                let item = service
                    .update_item(id, parse_body(body)?)
                    .await
                    .map_err(ITEM.failed("update"))?;
                ITEM.updated(item)
            }
            Operation::DeleteItem => {
                let id = ITEM.id(param)?;
                let removed = service
                    .delete_item(id)
                    .await
                    .map_err(ITEM.failed("delete"))?;
                ITEM.deleted(removed)
            }

            Operation::CreateTestimonial => {
                let testimonial = service
                    .create_testimonial(parse_body(body)?)
                    .await
                    .map_err(TESTIMONIAL.failed("create"))?;
                Ok(TESTIMONIAL.created(&testimonial))
            }
            Operation::UpdateTestimonial => {
                let id = TESTIMONIAL.id(param)?;
                let testimonial = service
                    .update_testimonial(id, parse_body(body)?)
                    .await
                    .map_err(TESTIMONIAL.failed("update"))?;
                TESTIMONIAL.updated(testimonial)
            }
            Operation::DeleteTestimonial => {
                let id = TESTIMONIAL.id(param)?;
                let removed = service
                    .delete_testimonial(id)
                    .await
                    .map_err(TESTIMONIAL.failed("delete"))?;
                TESTIMONIAL.deleted(removed)
            }

            Operation::CreateFaq => {
                let faq = service
                    .create_faq(parse_body(body)?)
                    .await
                    .map_err(FAQ.failed("create"))?;
                Ok(FAQ.created(&faq))
            }
            Operation::UpdateFaq => {
                let id = FAQ.id(param)?;
                let faq = service
                    .update_faq(id, parse_body(body)?)
                    .await
                    .map_err(FAQ.failed("update"))?;
                FAQ.updated(faq)
            }
            Operation::DeleteFaq => {
                let id = FAQ.id(param)?;
                let removed = service
                    .delete_faq(id)
                    .await
                    .map_err(FAQ.failed("delete"))?;
                FAQ.deleted(removed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::inmemory::InMemoryRepository;

    fn controller() -> Controller {
        Controller::new(ContentService::new(Arc::new(InMemoryRepository::new())))
    }

    async fn run(
        controller: &Controller,
        operation: Operation,
        param: Option<&str>,
        body: Option<&str>,
    ) -> DispatchResponse {
        match controller
            .handle(operation, param.map(String::from), body.map(String::from))
            .await
        {
            Ok(response) => response,
            Err(error) => error.into_response(),
        }
    }

    #[tokio::test]
    async fn test_create_section_returns_201() {
        let controller = controller();
        let response = run(
            &controller,
            Operation::CreateSection,
            None,
            Some(r#"{"key":"hero","title":"Welcome"}"#),
        )
        .await;

        assert_eq!(response.status, StatusCode::CREATED);
        let body = response.body.unwrap();
        assert_eq!(body["message"], "Content section created successfully");
        assert_eq!(body["data"]["key"], "hero");
        assert!(body["data"]["id"].is_string());
    }

    #[tokio::test]
    async fn test_validation_failure_lists_fields() {
        let controller = controller();
        let response = run(&controller, Operation::CreateFaq, None, Some("{}")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = response.body.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation failed");
        let fields: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["question", "answer"]);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let controller = controller();
        let response = run(&controller, Operation::CreateItem, None, Some("{not json")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body.unwrap()["message"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_missing_id_is_bad_request() {
        let controller = controller();
        let response = run(&controller, Operation::DeleteTestimonial, Some(""), None).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body.unwrap()["message"],
            "Testimonial ID is required"
        );
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_are_not_found() {
        let controller = controller();
        let missing = Uuid::new_v4().to_string();

        for id in [missing.as_str(), "not-a-uuid"] {
            let response = run(&controller, Operation::DeleteFaq, Some(id), None).await;
            assert_eq!(response.status, StatusCode::NOT_FOUND);
            assert_eq!(response.body.unwrap()["message"], "FAQ not found");
        }
    }

    #[tokio::test]
    async fn test_item_for_unknown_section_is_bad_request() {
        let controller = controller();
        let body = serde_json::json!({"section_id": Uuid::new_v4(), "title": "Box"}).to_string();
        let response = run(&controller, Operation::CreateItem, None, Some(&body)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = response.body.unwrap();
        assert_eq!(body["message"], "Failed to create content item");
        assert!(body["error"].as_str().unwrap().contains("Invalid data"));
    }

    #[tokio::test]
    async fn test_delete_has_no_data() {
        let controller = controller();
        let created = run(
            &controller,
            Operation::CreateTestimonial,
            None,
            Some(r#"{"name":"Ana","content":"Great"}"#),
        )
        .await;
        let id = created.body.unwrap()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = run(&controller, Operation::DeleteTestimonial, Some(&id), None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body,
            Some(serde_json::json!({
                "success": true,
                "message": "Testimonial deleted successfully"
            }))
        );
    }

    #[tokio::test]
    async fn test_section_key_required() {
        let controller = controller();
        let response = run(&controller, Operation::GetSectionContent, Some(" "), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body.unwrap()["message"], "Section key is required");
    }
}
