//! Events manager: the items of the `events` section, edited one at a time
//! with their date, venue and contact details kept in metadata.

use std::sync::Arc;

use uuid::Uuid;

use sitecontent_core::content::{
    sort_for_listing, ContentItem, ContentSection, EventDetails, EventFilter, EventStats,
    ItemPayload, EVENTS_SECTION_KEY,
};

use super::{cleanup_replaced, upload_image, CleanupReport, Notifications, SaveError, SaveStage};
use crate::client::ContentApi;
use crate::error::{ClientError, Result};
use crate::media::{ImageFile, MediaStore};

/// Upload folder used for event images.
pub const EVENT_IMAGE_FOLDER: &str = "content-images";

/// Form submitted when creating or editing an event. On edit, fields left
/// as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link_url: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
    pub details: EventDetails,
    pub image: Option<ImageFile>,
}

impl EventForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = details;
        self
    }

    pub fn with_image(mut self, image: ImageFile) -> Self {
        self.image = Some(image);
        self
    }
}

/// A saved event.
#[derive(Debug)]
pub struct EventSaved {
    pub item: ContentItem,
    pub created: bool,
    pub cleanup: CleanupReport,
}

/// Items of the events section.
pub struct EventBoard {
    api: Arc<dyn ContentApi>,
    media: Arc<dyn MediaStore>,
    section: ContentSection,
    events: Vec<ContentItem>,
    folder: String,
    notifications: Notifications,
}

impl EventBoard {
    /// Loads the events section and its items through the admin view.
    pub async fn load(
        api: Arc<dyn ContentApi>,
        media: Arc<dyn MediaStore>,
        notifications: Notifications,
    ) -> Result<Self> {
        let content = api.admin_content().await?;
        let section = content
            .sections
            .into_iter()
            .find(|s| s.key == EVENTS_SECTION_KEY)
            .ok_or_else(|| ClientError::NotFound {
                resource: "Events section".to_string(),
            })?;

        let mut board = Self {
            api,
            media,
            section,
            events: Vec::new(),
            folder: EVENT_IMAGE_FOLDER.to_string(),
            notifications,
        };
        board.set_events(content.items);
        Ok(board)
    }

    pub fn section(&self) -> &ContentSection {
        &self.section
    }

    /// All events, by display order then newest first.
    pub fn events(&self) -> &[ContentItem] {
        &self.events
    }

    pub fn event(&self, id: Uuid) -> Option<&ContentItem> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn filtered(&self, filter: &EventFilter) -> Vec<&ContentItem> {
        self.events.iter().filter(|e| filter.matches(e)).collect()
    }

    pub fn stats(&self) -> EventStats {
        EventStats::of(&self.events)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Creates an event at the end of the list unless the form sets an order.
    pub async fn create_event(&mut self, form: EventForm) -> std::result::Result<EventSaved, SaveError> {
        let result = self.save(None, form).await;
        self.notify(&result, "Event created successfully!");
        result
    }

    /// Edits an event. A new image replaces the stored one, which is deleted.
    pub async fn update_event(
        &mut self,
        id: Uuid,
        form: EventForm,
    ) -> std::result::Result<EventSaved, SaveError> {
        let result = self.save(Some(id), form).await;
        self.notify(&result, "Event updated successfully!");
        result
    }

    /// Deletes an event. Its image is left in storage.
    pub async fn delete_event(&mut self, id: Uuid) -> Result<()> {
        let result = self.api.delete_item(id).await;
        match &result {
            Ok(()) => {
                self.events.retain(|e| e.id != id);
                self.notifications.success("Event deleted successfully!");
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "Failed to delete event");
                self.notifications
                    .error("Failed to delete event. Please try again.");
            }
        }
        result
    }

    fn notify(&mut self, result: &std::result::Result<EventSaved, SaveError>, success: &str) {
        match result {
            Ok(_) => self.notifications.success(success),
            Err(error) => {
                let message = match error.stage {
                    SaveStage::Upload => format!("Failed to upload image: {}", error.source),
                    SaveStage::Save => "Failed to save event. Please try again.".to_string(),
                    SaveStage::Target | SaveStage::Validate => error.source.to_string(),
                };
                self.notifications.error(message);
            }
        }
    }

    async fn save(
        &mut self,
        id: Option<Uuid>,
        form: EventForm,
    ) -> std::result::Result<EventSaved, SaveError> {
        let existing = match id {
            Some(id) => Some(self.event(id).cloned().ok_or_else(|| {
                SaveError::new(
                    SaveStage::Target,
                    ClientError::NotFound {
                        resource: format!("event {id}"),
                    },
                )
            })?),
            None => None,
        };

        let EventForm {
            title,
            description,
            link_url,
            is_active,
            display_order,
            details,
            image,
        } = form;

        let mut payload = match &existing {
            Some(event) => {
                let mut payload = ItemPayload::from_item(event);
                if title.is_some() {
                    payload.title = title;
                }
                payload
            }
            None => ItemPayload::new(self.section.id, title.unwrap_or_default())
                .with_display_order(self.events.len() as i32)
                .with_active(true),
        };
        if description.is_some() {
            payload = payload.with_description(description);
        }
        if link_url.is_some() {
            payload.link_url = Some(link_url);
        }
        if let Some(active) = is_active {
            payload = payload.with_active(active);
        }
        if let Some(order) = display_order {
            payload = payload.with_display_order(order);
        }
        let mut metadata = existing
            .as_ref()
            .map(|event| event.metadata.clone())
            .unwrap_or_default();
        details.merge_into(&mut metadata);
        payload.metadata = Some(metadata);

        payload
            .validate()
            .map_err(|e| SaveError::new(SaveStage::Validate, ClientError::InvalidInput(e.to_string())))?;

        let new_image = match &image {
            Some(image) => Some(upload_image(self.media.as_ref(), image, &self.folder).await?),
            None => None,
        };

        let previous_image = existing.as_ref().and_then(|e| e.image_url.as_deref());
        let cleanup = match &new_image {
            Some(url) => cleanup_replaced(self.media.as_ref(), previous_image, Some(url.as_str())).await,
            None => CleanupReport::Skipped,
        };
        if let Some(url) = new_image {
            payload = payload.with_image_url(Some(url));
        }

        let item = match &existing {
            Some(event) => self.api.update_item(event.id, &payload).await,
            None => self.api.create_item(&payload).await,
        }
        .map_err(|e| SaveError::new(SaveStage::Save, e))?;

        self.refresh_after_save(&item).await;

        Ok(EventSaved {
            item,
            created: existing.is_none(),
            cleanup,
        })
    }

    /// Reloads the events. If the reload fails the saved event is merged
    /// into the local copy instead.
    async fn refresh_after_save(&mut self, saved: &ContentItem) {
        match self.api.admin_content().await {
            Ok(content) => self.set_events(content.items),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reload events after save");
                self.events.retain(|event| event.id != saved.id);
                self.events.push(saved.clone());
                sort_for_listing(&mut self.events);
            }
        }
    }

    fn set_events(&mut self, items: Vec<ContentItem>) {
        let section_id = self.section.id;
        self.events = items
            .into_iter()
            .filter(|item| item.section_id == section_id)
            .collect();
        sort_for_listing(&mut self.events);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use serde_json::json;
    use sitecontent_core::content::StatusFilter;

    use super::*;
    use crate::console::testing::{png, FakeApi, FakeMedia};

    struct Fixture {
        api: Arc<FakeApi>,
        media: Arc<FakeMedia>,
        section: ContentSection,
    }

    fn fixture(media: FakeMedia) -> Fixture {
        let section = ContentSection::new("events", "Events");
        let other = ContentSection::new("about", "About");
        let now = Utc::now();

        let mut gala = ContentItem::new(section.id, "Spring gala")
            .with_display_order(1)
            .with_image_url("https://cdn.example.com/content-images/gala.png")
            .with_created_at(now - Duration::hours(1));
        gala.metadata.insert("location".into(), json!("Main Hall"));
        gala.metadata.insert("date".into(), json!("2025-04-12"));
        gala.metadata.insert("featured".into(), json!(true));
        let workshop = ContentItem::new(section.id, "Workshop")
            .with_display_order(1)
            .with_active(false)
            .with_created_at(now);
        let unrelated = ContentItem::new(other.id, "Feature box");

        Fixture {
            api: Arc::new(FakeApi::with(
                vec![section.clone(), other],
                vec![gala, workshop, unrelated],
            )),
            media: Arc::new(media),
            section,
        }
    }

    async fn board(fixture: &Fixture) -> EventBoard {
        EventBoard::load(fixture.api.clone(), fixture.media.clone(), Notifications::default())
            .await
            .unwrap()
    }

    fn id_of(board: &EventBoard, title: &str) -> Uuid {
        board.events().iter().find(|e| e.title == title).unwrap().id
    }

    #[tokio::test]
    async fn test_loads_only_events_newest_first_on_tie() {
        let fixture = fixture(FakeMedia::default());
        let board = board(&fixture).await;

        let titles: Vec<&str> = board.events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Workshop", "Spring gala"]);
        assert_eq!(board.section().id, fixture.section.id);
        assert_eq!(
            board.stats(),
            EventStats {
                total: 2,
                active: 1,
                inactive: 1
            }
        );
    }

    #[tokio::test]
    async fn test_filter_by_search_and_status() {
        let fixture = fixture(FakeMedia::default());
        let board = board(&fixture).await;

        let by_location = board.filtered(&EventFilter {
            search: Some("main hall".to_string()),
            status: StatusFilter::All,
        });
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location[0].title, "Spring gala");

        let inactive = board.filtered(&EventFilter {
            search: None,
            status: StatusFilter::Inactive,
        });
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].title, "Workshop");
    }

    #[tokio::test]
    async fn test_create_event_goes_last_with_details() {
        let fixture = fixture(FakeMedia::default());
        let mut board = board(&fixture).await;

        let saved = board
            .create_event(
                EventForm::new("Open day")
                    .with_details(EventDetails {
                        date: Some("2025-09-01".to_string()),
                        guests: Some("120".to_string()),
                        ..EventDetails::default()
                    })
                    .with_image(png("open.png")),
            )
            .await
            .unwrap();

        assert!(saved.created);
        assert_eq!(saved.item.display_order, 2);
        assert!(saved.item.is_active);
        assert_eq!(saved.item.section_id, fixture.section.id);
        assert_eq!(saved.item.metadata["date"], json!("2025-09-01"));
        assert_eq!(saved.item.metadata["guests"], json!("120"));
        assert_eq!(
            saved.item.image_url.as_deref(),
            Some("https://cdn.example.com/content-images/open.png")
        );
        assert_eq!(saved.cleanup, CleanupReport::Skipped);
        assert_eq!(board.events().len(), 3);
        assert_eq!(
            board.notifications().last().unwrap().message,
            "Event created successfully!"
        );
    }

    #[tokio::test]
    async fn test_update_replaces_image_and_merges_details() {
        let fixture = fixture(FakeMedia::default());
        let mut board = board(&fixture).await;
        let gala = id_of(&board, "Spring gala");

        let saved = board
            .update_event(
                gala,
                EventForm {
                    details: EventDetails {
                        location: Some("Garden".to_string()),
                        ..EventDetails::default()
                    },
                    image: Some(png("gala-2.png")),
                    ..EventForm::default()
                },
            )
            .await
            .unwrap();

        assert!(!saved.created);
        assert_eq!(saved.item.title, "Spring gala");
        let details = EventDetails::from_metadata(&saved.item.metadata);
        assert_eq!(details.location.as_deref(), Some("Garden"));
        assert_eq!(details.date.as_deref(), Some("2025-04-12"));
        assert_eq!(saved.item.metadata["featured"], json!(true));
        assert_eq!(
            saved.cleanup,
            CleanupReport::Deleted {
                url: "https://cdn.example.com/content-images/gala.png".to_string()
            }
        );
        assert_eq!(fixture.api.writes(), vec![format!("update item {gala}")]);
        assert_eq!(
            board.notifications().last().unwrap().message,
            "Event updated successfully!"
        );
    }

    #[tokio::test]
    async fn test_blank_title_uploads_nothing() {
        let fixture = fixture(FakeMedia::default());
        let mut board = board(&fixture).await;
        let gala = id_of(&board, "Spring gala");

        let error = board
            .update_event(
                gala,
                EventForm::new(" ").with_image(png("gala-2.png")),
            )
            .await
            .unwrap_err();

        assert_eq!(error.stage, SaveStage::Validate);
        assert!(fixture.media.uploads().is_empty());
        assert!(fixture.media.deletes().is_empty());
        assert!(fixture.api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_event() {
        let fixture = fixture(FakeMedia::default());
        let mut board = board(&fixture).await;

        let error = board
            .update_event(Uuid::new_v4(), EventForm::new("x"))
            .await
            .unwrap_err();

        assert_eq!(error.stage, SaveStage::Target);
        assert!(fixture.api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_message() {
        let section = ContentSection::new("events", "Events");
        let api = Arc::new(FakeApi {
            fail_writes: true,
            ..FakeApi::with(vec![section], Vec::new())
        });
        let mut board = EventBoard::load(api, Arc::new(FakeMedia::default()), Notifications::default())
            .await
            .unwrap();

        let error = board.create_event(EventForm::new("Open day")).await.unwrap_err();

        assert_eq!(error.stage, SaveStage::Save);
        assert_eq!(
            board.notifications().last().unwrap().message,
            "Failed to save event. Please try again."
        );
    }

    #[tokio::test]
    async fn test_delete_keeps_image() {
        let fixture = fixture(FakeMedia::default());
        let mut board = board(&fixture).await;
        let gala = id_of(&board, "Spring gala");

        board.delete_event(gala).await.unwrap();

        assert!(board.event(gala).is_none());
        assert_eq!(board.stats().total, 1);
        assert_eq!(fixture.api.writes(), vec![format!("delete item {gala}")]);
        assert!(fixture.media.deletes().is_empty());
        assert_eq!(
            board.notifications().last().unwrap().message,
            "Event deleted successfully!"
        );
    }

    #[tokio::test]
    async fn test_missing_events_section() {
        let api = Arc::new(FakeApi::with(vec![ContentSection::new("about", "About")], Vec::new()));

        let result = EventBoard::load(api, Arc::new(FakeMedia::default()), Notifications::default()).await;

        assert!(matches!(result, Err(ClientError::NotFound { .. })));
    }
}
