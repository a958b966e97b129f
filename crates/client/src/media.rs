//! Media service client for image uploads.
//!
//! Images are sent base64-encoded as JSON. The service answers either with
//! the usual `{success, data}` envelope or with a bare object.

use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Content types accepted for upload.
pub const ALLOWED_IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Largest accepted image, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Default media endpoint.
pub const DEFAULT_MEDIA_URL: &str = "http://localhost:3000/media";

/// An image selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, guessing the content type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = content_type_for(path).to_string();
        Ok(Self::new(filename, content_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Checks type and size before anything is uploaded.
pub fn validate_image_file(file: &ImageFile) -> Result<()> {
    if !ALLOWED_IMAGE_TYPES.contains(&file.content_type.as_str()) {
        return Err(ClientError::InvalidInput(format!(
            "Invalid file type: {}. Allowed types: {}",
            file.content_type,
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }
    if file.size() > MAX_IMAGE_BYTES {
        return Err(ClientError::InvalidInput(format!(
            "File size too large: {:.2}MB. Maximum size is 5MB.",
            file.size() as f64 / 1024.0 / 1024.0
        )));
    }
    Ok(())
}

/// What the media service returns for an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Storage for uploaded images.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Uploads an image into `folder` and returns its public URL.
    async fn upload(&self, file: &ImageFile, folder: &str) -> Result<UploadedImage>;

    /// Deletes a previously uploaded image.
    async fn delete(&self, url: &str, key: Option<&str>) -> Result<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest<'a> {
    file: String,
    filename: &'a str,
    content_type: &'a str,
    folder: &'a str,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
}

/// [`MediaStore`] backed by the HTTP media endpoint.
#[derive(Debug, Clone)]
pub struct HttpMediaStore {
    client: reqwest::Client,
    media_url: String,
}

impl HttpMediaStore {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), media_url)
    }

    pub fn with_client(client: reqwest::Client, media_url: impl Into<String>) -> Self {
        Self {
            client,
            media_url: media_url.into(),
        }
    }

    /// Create from environment (SITECONTENT_MEDIA_URL or default).
    pub fn from_env() -> Self {
        let media_url = std::env::var("SITECONTENT_MEDIA_URL")
            .unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string());
        Self::new(media_url)
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, file: &ImageFile, folder: &str) -> Result<UploadedImage> {
        let request = UploadRequest {
            file: base64::engine::general_purpose::STANDARD.encode(&file.bytes),
            filename: &file.filename,
            content_type: &file.content_type,
            folder,
        };
        let response = self
            .client
            .post(&self.media_url)
            .json(&request)
            .send()
            .await?;

        let body = unwrap_media_response(response).await?;
        serde_json::from_value(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn delete(&self, url: &str, key: Option<&str>) -> Result<()> {
        let response = self
            .client
            .delete(&self.media_url)
            .json(&DeleteRequest { url, key })
            .send()
            .await?;

        unwrap_media_response(response).await?;
        Ok(())
    }
}

/// Returns the payload of a media response: `data` for an envelope, the
/// whole body otherwise.
async fn unwrap_media_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    let body: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };

    let envelope_failed = body.get("success").and_then(Value::as_bool) == Some(false);
    if !status.is_success() || envelope_failed {
        let message = body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("media service returned {status}"));
        return Err(ClientError::Media(message));
    }

    match body {
        Value::Object(mut map) if map.contains_key("success") => {
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}
