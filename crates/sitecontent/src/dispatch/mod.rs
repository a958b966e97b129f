//! Request dispatcher.
//!
//! Normalizes the path, resolves an [`Operation`] from the route table,
//! opens the store on demand and hands the request to the controller.

mod request;
mod routes;

use std::sync::Arc;

pub use request::{
    DispatchRequest, DispatchResponse, ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN,
};
pub use routes::Operation;

use axum::http::Method;

use routes::{normalize_path, RouteMatch, RouteTable};

use crate::controller::Controller;
use crate::service::ContentService;
use crate::store::StoreHandle;

/// Routes requests to the content controller.
pub struct Dispatcher {
    routes: RouteTable,
    store: Arc<StoreHandle>,
    prefix: String,
}

impl Dispatcher {
    pub fn new(store: Arc<StoreHandle>, prefix: impl Into<String>) -> Self {
        Self {
            routes: RouteTable::content(),
            store,
            prefix: prefix.into(),
        }
    }

    /// Handles one request. Never fails: every outcome is a response.
    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResponse {
        let DispatchRequest {
            method,
            path,
            path_params,
            body,
            ..
        } = request;

        if method == Method::OPTIONS {
            tracing::debug!(%path, "CORS preflight");
            return DispatchResponse::preflight();
        }

        let normalized = normalize_path(&path, &self.prefix);
        let Some(RouteMatch { operation, param }) = self.routes.resolve(&method, &normalized)
        else {
            tracing::info!(%method, %path, "No route matched");
            return DispatchResponse::not_found();
        };

        // Host-supplied parameters win over the parsed remainder.
        let param = operation
            .param_name()
            .and_then(|name| path_params.get(name).cloned())
            .or_else(|| param.map(String::from));

        tracing::info!(%method, %path, ?operation, "Dispatching request");

        let store = match self.store.get().await {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open content store");
                return DispatchResponse::internal_error(e);
            }
        };

        let controller = Controller::new(ContentService::new(store));
        let task = tokio::spawn(async move {
            match controller.handle(operation, param, body).await {
                Ok(response) => response,
                Err(error) => error.into_response(),
            }
        });

        match task.await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, ?operation, "Controller failed");
                DispatchResponse::internal_error(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use super::*;
    use crate::store::testing::CountingConnector;

    fn dispatcher() -> (Dispatcher, CountingConnector) {
        let connector = CountingConnector::default();
        let store = Arc::new(StoreHandle::new(connector.clone()));
        (Dispatcher::new(store, "/content"), connector)
    }

    fn data(response: &DispatchResponse) -> &Value {
        &response.body.as_ref().unwrap()["data"]
    }

    async fn create_section(dispatcher: &Dispatcher, key: &str) -> String {
        let response = dispatcher
            .dispatch(
                DispatchRequest::new(Method::POST, "/content/sections")
                    .with_json(&json!({"key": key, "title": key})),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        data(&response)["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_options_never_opens_store() {
        let (dispatcher, connector) = dispatcher();

        for path in ["/content", "/content/sections/abc", "/anything/else"] {
            let response = dispatcher
                .dispatch(DispatchRequest::new(Method::OPTIONS, path))
                .await;
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(response.body, None);
            assert!(response
                .headers()
                .iter()
                .any(|(name, value)| *name == header::ACCESS_CONTROL_ALLOW_CREDENTIALS
                    && value == "false"));
        }

        assert_eq!(connector.opens(), 0);
    }

    #[tokio::test]
    async fn test_unmatched_route_is_404() {
        let (dispatcher, connector) = dispatcher();

        for (method, path) in [
            (Method::GET, "/content/unknown"),
            (Method::PATCH, "/content/sections/1"),
            (Method::POST, "/content/"),
            (Method::DELETE, "/content/items"),
        ] {
            let response = dispatcher.dispatch(DispatchRequest::new(method, path)).await;
            assert_eq!(response.status, StatusCode::NOT_FOUND);
            assert_eq!(
                response.body,
                Some(json!({"success": false, "message": "Endpoint not found"}))
            );
        }

        assert_eq!(connector.opens(), 0);
    }

    #[tokio::test]
    async fn test_every_route_reaches_its_operation() {
        let (dispatcher, _) = dispatcher();
        let missing = Uuid::new_v4();

        let cases = [
            (Method::GET, "/content".to_string(), StatusCode::OK, None),
            (Method::GET, "/content/admin".to_string(), StatusCode::OK, None),
            (
                Method::GET,
                "/content/section/hero".to_string(),
                StatusCode::OK,
                None,
            ),
            (
                Method::PUT,
                format!("/content/sections/{missing}"),
                StatusCode::BAD_REQUEST,
                Some("Validation failed"),
            ),
            (
                Method::DELETE,
                format!("/content/sections/{missing}"),
                StatusCode::NOT_FOUND,
                Some("Content section not found"),
            ),
            (
                Method::DELETE,
                format!("/content/items/{missing}"),
                StatusCode::NOT_FOUND,
                Some("Content item not found"),
            ),
            (
                Method::DELETE,
                format!("/content/testimonials/{missing}"),
                StatusCode::NOT_FOUND,
                Some("Testimonial not found"),
            ),
            (
                Method::DELETE,
                format!("/content/faqs/{missing}"),
                StatusCode::NOT_FOUND,
                Some("FAQ not found"),
            ),
            (
                Method::DELETE,
                "/content/faqs/".to_string(),
                StatusCode::BAD_REQUEST,
                Some("FAQ ID is required"),
            ),
            (
                Method::POST,
                "/content/testimonials".to_string(),
                StatusCode::BAD_REQUEST,
                Some("Validation failed"),
            ),
        ];

        for (method, path, status, message) in cases {
            let response = dispatcher
                .dispatch(DispatchRequest::new(method.clone(), path.clone()))
                .await;
            assert_eq!(response.status, status, "{method} {path}");
            if let Some(message) = message {
                assert_eq!(
                    response.body.as_ref().unwrap()["message"],
                    message,
                    "{method} {path}"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_create_section_then_fetch_by_key() {
        let (dispatcher, _) = dispatcher();

        let body = json!({
            "key": "hero",
            "title": "Welcome",
            "content": "Hello there",
            "is_active": true,
            "display_order": 0
        });
        let created = dispatcher
            .dispatch(DispatchRequest::new(Method::POST, "/content/sections").with_json(&body))
            .await;

        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.success(), Some(true));
        let section = data(&created).clone();
        assert!(Uuid::parse_str(section["id"].as_str().unwrap()).is_ok());
        assert_eq!(section["title"], "Welcome");
        assert_eq!(section["content"], "Hello there");

        let fetched = dispatcher
            .dispatch(DispatchRequest::new(Method::GET, "/content/section/hero"))
            .await;

        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(data(&fetched)["section"], section);
        assert_eq!(data(&fetched)["items"], json!([]));
    }

    #[tokio::test]
    async fn test_item_update_without_title_leaves_store_unchanged() {
        let (dispatcher, _) = dispatcher();
        let section_id = create_section(&dispatcher, "about").await;

        let created = dispatcher
            .dispatch(
                DispatchRequest::new(Method::POST, "/content/items").with_json(&json!({
                    "section_id": section_id,
                    "title": "Box 1",
                    "display_order": 1
                })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        let item_id = data(&created)["id"].as_str().unwrap().to_string();

        let response = dispatcher
            .dispatch(
                DispatchRequest::new(Method::PUT, format!("/content/items/{item_id}"))
                    .with_json(&json!({"section_id": section_id, "description": "changed"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body.as_ref().unwrap()["message"], "Validation failed");
        assert!(data(&response)
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["field"] == "title"));

        let admin = dispatcher
            .dispatch(DispatchRequest::new(Method::GET, "/content/admin"))
            .await;
        let items = data(&admin)["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Box 1");
        assert_eq!(items[0]["description"], Value::Null);
    }

    #[tokio::test]
    async fn test_host_path_param_wins() {
        let (dispatcher, _) = dispatcher();
        let id = create_section(&dispatcher, "events").await;

        let response = dispatcher
            .dispatch(
                DispatchRequest::new(Method::DELETE, "/content/sections/ignored")
                    .with_path_param("id", id),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body.as_ref().unwrap()["message"],
            "Content section deleted successfully"
        );
    }

    #[tokio::test]
    async fn test_public_read_hides_inactive_rows() {
        let (dispatcher, _) = dispatcher();
        create_section(&dispatcher, "hero").await;
        dispatcher
            .dispatch(
                DispatchRequest::new(Method::POST, "/content/faqs").with_json(&json!({
                    "question": "Hidden?",
                    "answer": "Yes",
                    "is_active": false
                })),
            )
            .await;

        let public = dispatcher
            .dispatch(DispatchRequest::new(Method::GET, "/content"))
            .await;
        assert_eq!(data(&public)["sections"].as_array().unwrap().len(), 1);
        assert_eq!(data(&public)["faqs"], json!([]));

        let admin = dispatcher
            .dispatch(DispatchRequest::new(Method::GET, "/content/admin"))
            .await;
        assert_eq!(data(&admin)["faqs"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_open_failure_is_500() {
        let connector = CountingConnector {
            fail: true,
            ..CountingConnector::default()
        };
        let dispatcher = Dispatcher::new(Arc::new(StoreHandle::new(connector)), "/content");

        let response = dispatcher
            .dispatch(DispatchRequest::new(Method::GET, "/content"))
            .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.body.unwrap();
        assert_eq!(body["message"], "Internal server error");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("database unavailable"));
    }

    #[tokio::test]
    async fn test_concurrent_first_requests_open_once() {
        let connector = CountingConnector {
            delay: Some(Duration::from_millis(20)),
            ..CountingConnector::default()
        };
        let store = Arc::new(StoreHandle::new(connector.clone()));
        let dispatcher = Arc::new(Dispatcher::new(store, "/content"));

        let requests = (0..8).map(|_| {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                dispatcher
                    .dispatch(DispatchRequest::new(Method::GET, "/content"))
                    .await
            })
        });
        for request in requests.collect::<Vec<_>>() {
            assert_eq!(request.await.unwrap().status, StatusCode::OK);
        }

        assert_eq!(connector.opens(), 1);
    }
}
