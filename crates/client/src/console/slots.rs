//! Slot board for fixed-layout sections such as the about page's feature
//! boxes.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use sitecontent_core::content::{sort_for_listing, ContentItem, ContentSection, ItemPayload, SlotMap};

use super::{cleanup_replaced, upload_image, CleanupReport, Notifications, SaveError, SaveStage};
use crate::client::ContentApi;
use crate::error::{ClientError, Result};
use crate::media::{ImageFile, MediaStore};

/// Upload folder used for slot images.
pub const SLOT_IMAGE_FOLDER: &str = "about-page-images";

/// Form submitted for one slot.
#[derive(Debug, Clone, Default)]
pub struct SlotForm {
    pub title: String,
    pub description: Option<String>,
    pub link_url: Option<String>,
    pub image: Option<ImageFile>,
}

impl SlotForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: ImageFile) -> Self {
        self.image = Some(image);
        self
    }
}

/// What happened to one slot submission.
#[derive(Debug)]
pub enum SlotOutcome {
    Saved {
        slot: u32,
        item: ContentItem,
        /// True if the slot had no item and one was created.
        created: bool,
        cleanup: CleanupReport,
    },
    Failed {
        slot: u32,
        error: SaveError,
    },
}

impl SlotOutcome {
    pub fn slot(&self) -> u32 {
        match self {
            SlotOutcome::Saved { slot, .. } | SlotOutcome::Failed { slot, .. } => *slot,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SlotOutcome::Saved { .. })
    }
}

/// One row of [`SlotBoard::view`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub slot: u32,
    pub item: Option<ContentItem>,
}

/// Editable slots of one section.
pub struct SlotBoard {
    api: Arc<dyn ContentApi>,
    media: Arc<dyn MediaStore>,
    section: ContentSection,
    items: Vec<ContentItem>,
    slots: SlotMap,
    folder: String,
    notifications: Notifications,
}

impl SlotBoard {
    /// Loads the section with `key` and its items through the admin view.
    pub async fn load(
        api: Arc<dyn ContentApi>,
        media: Arc<dyn MediaStore>,
        key: &str,
        slot_count: u32,
        notifications: Notifications,
    ) -> Result<Self> {
        let content = api.admin_content().await?;
        let section = content
            .sections
            .into_iter()
            .find(|s| s.key == key)
            .ok_or_else(|| ClientError::NotFound {
                resource: format!("section {key}"),
            })?;

        let mut board = Self {
            api,
            media,
            slots: SlotMap::build(section.id, &[], slot_count),
            section,
            items: Vec::new(),
            folder: SLOT_IMAGE_FOLDER.to_string(),
            notifications,
        };
        board.set_items(content.items);

        if !board.slots.duplicates().is_empty() {
            tracing::warn!(
                section = %board.section.key,
                duplicates = ?board.slots.duplicates(),
                "Items share a slot's display order; only the first is editable"
            );
        }
        Ok(board)
    }

    /// Upload folder for slot images.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn section(&self) -> &ContentSection {
        &self.section
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// The item bound to `slot`.
    pub fn item_in(&self, slot: u32) -> Option<&ContentItem> {
        let id = self.slots.item_for(slot)?;
        self.items.iter().find(|item| item.id == id)
    }

    /// Every slot with its item, in slot order.
    pub fn view(&self) -> Vec<SlotView> {
        self.slots
            .slots()
            .map(|(slot, _)| SlotView {
                slot,
                item: self.item_in(slot).cloned(),
            })
            .collect()
    }

    /// Saves one slot: upload, delete the replaced image, then update the
    /// bound item or create one for the slot.
    pub async fn submit_slot(&mut self, slot: u32, form: SlotForm) -> SlotOutcome {
        let outcome = self.save_slot(slot, form).await;
        match &outcome {
            SlotOutcome::Saved { created, .. } => {
                let verb = if *created { "created" } else { "updated" };
                self.notifications
                    .success(format!("Slot {slot} {verb} successfully"));
            }
            SlotOutcome::Failed { error, .. } => {
                let message = match error.stage {
                    SaveStage::Upload => format!("Failed to upload image: {}", error.source),
                    SaveStage::Save => format!("Failed to update content: {}", error.source),
                    SaveStage::Target | SaveStage::Validate => error.source.to_string(),
                };
                self.notifications.error(message);
            }
        }
        outcome
    }

    async fn save_slot(&mut self, slot: u32, form: SlotForm) -> SlotOutcome {
        let failed = |stage, source| SlotOutcome::Failed {
            slot,
            error: SaveError::new(stage, source),
        };

        if !self.slots.contains(slot) {
            return failed(
                SaveStage::Target,
                ClientError::InvalidInput(format!(
                    "slot {slot} is outside 1..={}",
                    self.slots.slot_count()
                )),
            );
        }

        let existing = self.item_in(slot).cloned();
        let previous_image = existing.as_ref().and_then(|item| item.image_url.clone());

        let SlotForm {
            title,
            description,
            link_url,
            image,
        } = form;

        let mut payload = match &existing {
            Some(item) => {
                // Fields left out of the form keep their stored value.
                let mut payload = ItemPayload::from_item(item);
                payload.title = Some(title);
                if description.is_some() {
                    payload = payload.with_description(description);
                }
                if link_url.is_some() {
                    payload.link_url = Some(link_url);
                }
                payload
            }
            None => {
                let mut payload = ItemPayload::new(self.section.id, title)
                    .with_description(description)
                    .with_display_order(SlotMap::display_order_for(slot))
                    .with_active(true);
                payload.link_url = Some(link_url);
                payload
            }
        };

        // Nothing is uploaded or deleted for a record the API would reject.
        if let Err(e) = payload.validate() {
            return failed(SaveStage::Validate, ClientError::InvalidInput(e.to_string()));
        }

        let new_image = match &image {
            Some(image) => match upload_image(self.media.as_ref(), image, &self.folder).await {
                Ok(url) => Some(url),
                Err(error) => return SlotOutcome::Failed { slot, error },
            },
            None => None,
        };

        let cleanup = match &new_image {
            Some(url) => {
                cleanup_replaced(self.media.as_ref(), previous_image.as_deref(), Some(url.as_str()))
                    .await
            }
            None => CleanupReport::Skipped,
        };

        if let Some(url) = new_image {
            payload = payload.with_image_url(Some(url));
        }

        let result = match &existing {
            Some(item) => self.api.update_item(item.id, &payload).await,
            None => self.api.create_item(&payload).await,
        };

        let item = match result {
            Ok(item) => item,
            Err(source) => return failed(SaveStage::Save, source),
        };

        self.refresh_after_save(slot, &item).await;

        SlotOutcome::Saved {
            slot,
            item,
            created: existing.is_none(),
            cleanup,
        }
    }

    /// Deletes the slot's image, then clears it on the item. Unlike a slot
    /// save, the delete must succeed.
    pub async fn remove_slot_image(&mut self, slot: u32) -> Result<ContentItem> {
        let result = self.clear_slot_image(slot).await;
        match &result {
            Ok(_) => self.notifications.success("Image deleted successfully!"),
            Err(e) => self
                .notifications
                .error(format!("Failed to delete image. Please try again. ({e})")),
        }
        result
    }

    async fn clear_slot_image(&mut self, slot: u32) -> Result<ContentItem> {
        let item = self.item_in(slot).cloned().ok_or_else(|| {
            ClientError::InvalidInput(format!("slot {slot} has no item"))
        })?;
        let url = item
            .image_url
            .clone()
            .ok_or_else(|| ClientError::InvalidInput(format!("slot {slot} has no image")))?;

        self.media.delete(&url, None).await?;

        let payload = ItemPayload::from_item(&item).with_image_url(None);
        let updated = self.api.update_item(item.id, &payload).await?;
        self.refresh_after_save(slot, &updated).await;
        Ok(updated)
    }

    /// Reloads all items and rebuilds the slot map. If the reload fails the
    /// saved item is merged into the local copy instead.
    async fn refresh_after_save(&mut self, slot: u32, saved: &ContentItem) {
        match self.api.admin_content().await {
            Ok(content) => self.set_items(content.items),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reload items after save");
                self.notifications
                    .error(format!("Saved, but failed to reload content: {e}"));
                self.items.retain(|item| item.id != saved.id);
                self.items.push(saved.clone());
                sort_for_listing(&mut self.items);
                self.slots.bind(slot, saved.id);
            }
        }
    }

    fn set_items(&mut self, items: Vec<ContentItem>) {
        let section_id = self.section.id;
        let mut items: Vec<ContentItem> = items
            .into_iter()
            .filter(|item| item.section_id == section_id)
            .collect();
        sort_for_listing(&mut items);
        self.slots = SlotMap::build(section_id, &items, self.slots.slot_count());
        self.items = items;
    }

    /// IDs of items hidden behind another item with the same slot.
    pub fn duplicates(&self) -> &[Uuid] {
        self.slots.duplicates()
    }
}
