use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    extract::{Query, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{
    set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use sitecontent_core::content::ApiResponse;

use crate::dispatch::{
    DispatchRequest, DispatchResponse, Dispatcher, ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN,
};

/// Upper bound on request bodies read by the host.
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
}

/// Create the application router. Every path goes to the dispatcher, which
/// owns routing.
///
/// The CORS layers sit outside the timeout so a timed-out request still
/// carries them.
pub fn create_app(dispatcher: Arc<Dispatcher>, timeout: Duration) -> Router {
    Router::new()
        .fallback(dispatch_request)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .with_state(AppState { dispatcher })
}

fn invalid_body(error: impl std::fmt::Display) -> Response {
    DispatchResponse::envelope(
        StatusCode::BAD_REQUEST,
        &ApiResponse::<serde_json::Value>::failure("Invalid request body")
            .with_error(error.to_string()),
    )
    .into_response()
}

async fn dispatch_request(State(state): State<AppState>, request: Request) -> Response {
    let path_params = host_path_params(&request);
    let (parts, body) = request.into_parts();

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) if bytes.is_empty() => None,
        Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(error = %e, "Request body is not valid UTF-8");
                return invalid_body(e);
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request body");
            return invalid_body(e);
        }
    };

    let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(query)| query)
        .unwrap_or_default();

    let request = DispatchRequest {
        method: parts.method,
        path: parts.uri.path().to_string(),
        path_params,
        query,
        body,
    };

    state.dispatcher.dispatch(request).await.into_response()
}

/// Path parameters extracted by API Gateway, when running under Lambda.
#[cfg(feature = "lambda")]
fn host_path_params(request: &Request) -> HashMap<String, String> {
    use lambda_http::RequestExt;

    request
        .path_parameters()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[cfg(not(feature = "lambda"))]
fn host_path_params(_request: &Request) -> HashMap<String, String> {
    HashMap::new()
}

impl IntoResponse for DispatchResponse {
    fn into_response(self) -> Response {
        let headers = self.headers();
        let body = match &self.body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };

        let mut response = (self.status, body).into_response();
        response.headers_mut().extend(headers);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::storage::inmemory::InMemoryRepository;
    use crate::store::testing::CountingConnector;
    use crate::store::{InMemoryConnector, StoreHandle};

    fn app(seed: bool) -> Router {
        let connector = InMemoryConnector::new(InMemoryRepository::new()).with_seed(seed);
        let store = Arc::new(StoreHandle::new(connector));
        let dispatcher = Arc::new(Dispatcher::new(store, "/content"));
        create_app(dispatcher, Duration::from_secs(10))
    }

    async fn json_body(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_get_all_content_seeded() {
        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/content")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["sections"].as_array().unwrap().len(), 4);
        assert_eq!(json["data"]["faqs"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_preflight_has_no_body() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/content/items/123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "false"
        );
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_update_testimonial() {
        let app = app(false);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/content/testimonials")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({"name": "Lucía", "content": "Wonderful", "rating": 4}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/content/testimonials/{id}"))
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({"name": "Lucía", "content": "Still wonderful"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["message"], "Testimonial updated successfully");
        assert_eq!(updated["data"]["content"], "Still wonderful");
        assert_eq!(updated["data"]["rating"], 4);
        assert_eq!(updated["data"]["created_at"], created["data"]["created_at"]);
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .uri("/content/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(
            json,
            json!({"success": false, "message": "Endpoint not found"})
        );
    }

    #[tokio::test]
    async fn test_empty_post_body_is_validated() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/content/sections")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Validation failed");
        let fields: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["key", "title"]);
    }

    #[tokio::test]
    async fn test_timed_out_request_keeps_cors_headers() {
        let connector = CountingConnector {
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        };
        let store = Arc::new(StoreHandle::new(connector));
        let dispatcher = Arc::new(Dispatcher::new(store, "/content"));
        let app = create_app(dispatcher, Duration::from_millis(10));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/content")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            ALLOW_METHODS
        );
    }

    #[tokio::test]
    async fn test_non_utf8_body_is_rejected() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/content/faqs")
                    .body(Body::from(vec![0xff, 0xfe, 0x7b]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_blank_optional_strings_round_trip() {
        let app = app(false);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/content/sections")
                    .body(Body::from(
                        json!({"key": "about", "title": "About", "content": ""}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let section = json_body(response).await;
        assert_eq!(section["data"]["content"], "");
        let section_id = section["data"]["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/content/items")
                    .body(Body::from(
                        json!({
                            "section_id": section_id,
                            "title": "Box",
                            "description": "",
                            "link_url": ""
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/content/admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = json_body(response).await;
        let item = &json["data"]["items"][0];
        assert_eq!(item["description"], "");
        assert_eq!(item["link_url"], "");
    }
}
