//! Section-level editor: title, body text and the section image.

use std::sync::Arc;

use sitecontent_core::content::{ContentSection, SectionPayload};

use super::{cleanup_replaced, upload_image, CleanupReport, Notifications, SaveError, SaveStage};
use crate::client::ContentApi;
use crate::error::{ClientError, Result};
use crate::media::{ImageFile, MediaStore};

/// Upload folder used for section images.
pub const SECTION_IMAGE_FOLDER: &str = "section-images";

/// Form submitted for a section. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct SectionForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub image: Option<ImageFile>,
}

/// A saved section and the result of deleting its previous image.
#[derive(Debug, Clone)]
pub struct SectionSaved {
    pub section: ContentSection,
    pub cleanup: CleanupReport,
}

/// Editor for one section.
pub struct SectionEditor {
    api: Arc<dyn ContentApi>,
    media: Arc<dyn MediaStore>,
    section: ContentSection,
    folder: String,
    notifications: Notifications,
}

impl SectionEditor {
    /// Loads the section with `key` through the admin view.
    pub async fn load(
        api: Arc<dyn ContentApi>,
        media: Arc<dyn MediaStore>,
        key: &str,
        notifications: Notifications,
    ) -> Result<Self> {
        let section = api
            .admin_content()
            .await?
            .sections
            .into_iter()
            .find(|s| s.key == key)
            .ok_or_else(|| ClientError::NotFound {
                resource: format!("section {key}"),
            })?;

        Ok(Self {
            api,
            media,
            section,
            folder: SECTION_IMAGE_FOLDER.to_string(),
            notifications,
        })
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn section(&self) -> &ContentSection {
        &self.section
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Uploads the new image if any, deletes the one it replaces, then
    /// updates the section.
    pub async fn save_section(
        &mut self,
        form: SectionForm,
    ) -> std::result::Result<SectionSaved, SaveError> {
        let result = self.save(form).await;
        match &result {
            Ok(_) => self
                .notifications
                .success(format!("{} section updated successfully!", self.section.title)),
            Err(e) => {
                let message = match e.stage {
                    SaveStage::Upload => format!("Failed to upload image: {}", e.source),
                    _ => format!("Failed to update {} section: {}", self.section.key, e.source),
                };
                self.notifications.error(message);
            }
        }
        result
    }

    async fn save(&mut self, form: SectionForm) -> std::result::Result<SectionSaved, SaveError> {
        let mut payload = SectionPayload::from_section(&self.section);
        if let Some(title) = form.title {
            payload.title = Some(title);
        }
        if let Some(content) = form.content {
            payload = payload.with_content(content);
        }
        if let Some(is_active) = form.is_active {
            payload = payload.with_active(is_active);
        }
        payload.validate().map_err(|e| {
            SaveError::new(SaveStage::Validate, ClientError::InvalidInput(e.to_string()))
        })?;

        let new_image = match &form.image {
            Some(image) => Some(upload_image(self.media.as_ref(), image, &self.folder).await?),
            None => None,
        };

        let cleanup = match &new_image {
            Some(url) => {
                cleanup_replaced(
                    self.media.as_ref(),
                    self.section.image_url.as_deref(),
                    Some(url.as_str()),
                )
                .await
            }
            None => CleanupReport::Skipped,
        };

        if let Some(url) = new_image {
            payload = payload.with_image_url(Some(url));
        }

        let section = self
            .api
            .update_section(self.section.id, &payload)
            .await
            .map_err(|e| SaveError::new(SaveStage::Save, e))?;
        self.section = section.clone();

        Ok(SectionSaved { section, cleanup })
    }
}
