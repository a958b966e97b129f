//! Admin console workflows.
//!
//! Saving anything with an image follows the same sequence: validate the
//! file, upload it, delete the image it replaces, then write the record.
//! Upload must succeed before anything is written. Deleting the superseded
//! image is best-effort; its result is reported in a [`CleanupReport`].

pub mod events;
pub mod notify;
pub mod section;
pub mod slots;

pub use events::{EventBoard, EventForm, EventSaved, EVENT_IMAGE_FOLDER};
pub use notify::{Notification, NotificationKind, Notifications, DEFAULT_NOTIFICATION_TTL};
pub use section::{SectionEditor, SectionForm, SectionSaved};
pub use slots::{SlotBoard, SlotForm, SlotOutcome};

use serde::Serialize;
use thiserror::Error;

use crate::error::ClientError;
use crate::media::{validate_image_file, ImageFile, MediaStore};

/// Step of a save at which it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStage {
    /// The target (slot or section) does not exist.
    Target,
    Validate,
    Upload,
    Save,
}

/// A failed save. Nothing was written unless `stage` is `Save`, in which
/// case an image may already have been uploaded.
#[derive(Debug, Error)]
#[error("{stage:?} failed: {source}")]
pub struct SaveError {
    pub stage: SaveStage,
    #[source]
    pub source: ClientError,
}

impl SaveError {
    pub fn new(stage: SaveStage, source: ClientError) -> Self {
        Self { stage, source }
    }
}

/// Result of deleting the image a save replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CleanupReport {
    /// No image was replaced.
    Skipped,
    Deleted { url: String },
    Failed { url: String, error: String },
}

impl CleanupReport {
    pub fn is_failed(&self) -> bool {
        matches!(self, CleanupReport::Failed { .. })
    }
}

/// Validates and uploads `image`, returning its URL.
async fn upload_image(
    media: &dyn MediaStore,
    image: &ImageFile,
    folder: &str,
) -> Result<String, SaveError> {
    validate_image_file(image).map_err(|e| SaveError::new(SaveStage::Validate, e))?;
    let uploaded = media
        .upload(image, folder)
        .await
        .map_err(|e| SaveError::new(SaveStage::Upload, e))?;
    tracing::debug!(url = %uploaded.url, folder, "Uploaded image");
    Ok(uploaded.url)
}

/// Deletes `previous` if it was replaced by `current`. Never fails.
async fn cleanup_replaced(
    media: &dyn MediaStore,
    previous: Option<&str>,
    current: Option<&str>,
) -> CleanupReport {
    let Some(previous) = previous.filter(|p| Some(*p) != current && !p.is_empty()) else {
        return CleanupReport::Skipped;
    };

    match media.delete(previous, None).await {
        Ok(()) => CleanupReport::Deleted {
            url: previous.to_string(),
        },
        Err(e) => {
            tracing::warn!(url = %previous, error = %e, "Failed to delete replaced image");
            CleanupReport::Failed {
                url: previous.to_string(),
                error: e.to_string(),
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeMedia;
    use super::*;

    #[tokio::test]
    async fn test_cleanup_skips_when_nothing_replaced() {
        let media = FakeMedia::default();

        assert_eq!(
            cleanup_replaced(&media, None, Some("https://cdn/new.png")).await,
            CleanupReport::Skipped
        );
        assert_eq!(
            cleanup_replaced(&media, Some("https://cdn/a.png"), Some("https://cdn/a.png")).await,
            CleanupReport::Skipped
        );
        assert!(media.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_failure_is_captured() {
        let media = FakeMedia {
            fail_delete: true,
            ..FakeMedia::default()
        };

        let report = cleanup_replaced(&media, Some("https://cdn/old.png"), Some("https://cdn/new.png")).await;

        assert!(report.is_failed());
        assert_eq!(
            report,
            CleanupReport::Failed {
                url: "https://cdn/old.png".to_string(),
                error: "Media service error: AccessDenied".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_upload_validates_first() {
        let media = FakeMedia::default();
        let file = ImageFile::new("doc.pdf", "application/pdf", vec![1]);

        let err = upload_image(&media, &file, "uploads").await.unwrap_err();

        assert_eq!(err.stage, SaveStage::Validate);
        assert!(media.uploads().is_empty());
    }
}
