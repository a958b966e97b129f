//! SQLite repository implementation.
//!
//! Implements the repository traits from `sitecontent_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::Row;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use sitecontent_core::content::{ContentItem, ContentSection, Faq, Testimonial};
use sitecontent_core::storage::{
    FaqRepository, ItemRepository, RepositoryError, Result, SectionRepository,
    TestimonialRepository, Visibility,
};

use super::conversions::{
    format_datetime, metadata_to_json, row_to_faq, row_to_item, row_to_section,
    row_to_testimonial,
};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

type RowMapper<T> = fn(&Row) -> rusqlite::Result<T>;

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all content types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize connection settings and the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::PRAGMAS).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs a listing query and maps every row.
    async fn query_all<T>(
        &self,
        sql: String,
        params: Vec<Value>,
        mapper: RowMapper<T>,
        entity_type: &'static str,
    ) -> Result<Vec<T>>
    where
        T: Send + 'static,
    {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(params), mapper)
                    .map_err(wrap_err)?;

                let mut out = Vec::new();
                for row_result in rows {
                    out.push(row_result.map_err(wrap_err)?);
                }
                Ok(out)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type))
    }

    /// Fetches a single row by ID.
    async fn query_by_id<T>(
        &self,
        sql: String,
        id: Uuid,
        mapper: RowMapper<T>,
        entity_type: &'static str,
    ) -> Result<Option<T>>
    where
        T: Send + 'static,
    {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                match stmt.query_row([&id_str], mapper) {
                    Ok(row) => Ok(Some(row)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, entity_type, id.to_string()))
    }

    /// Executes an insert.
    async fn insert(
        &self,
        sql: &'static str,
        params: Vec<Value>,
        entity_type: &'static str,
        id: Uuid,
    ) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(sql, rusqlite::params_from_iter(params))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, entity_type, id.to_string()))
    }

    /// Executes an update or delete that must touch exactly one row.
    async fn modify_one(
        &self,
        sql: &'static str,
        params: Vec<Value>,
        entity_type: &'static str,
        id: Uuid,
    ) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(sql, rusqlite::params_from_iter(params))
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, entity_type, id.to_string()))
    }
}

fn active_only(visibility: Visibility) -> bool {
    visibility == Visibility::Active
}

// ============================================================================
// SectionRepository implementation
// ============================================================================

#[async_trait]
impl SectionRepository for SqliteRepository {
    async fn list_sections(&self, visibility: Visibility) -> Result<Vec<ContentSection>> {
        self.query_all(
            schema::select_sections(active_only(visibility)),
            Vec::new(),
            row_to_section,
            "ContentSection",
        )
        .await
    }

    async fn get_section(&self, id: Uuid) -> Result<Option<ContentSection>> {
        self.query_by_id(schema::select_section_by_id(), id, row_to_section, "ContentSection")
            .await
    }

    async fn get_section_by_key(
        &self,
        key: &str,
        visibility: Visibility,
    ) -> Result<Option<ContentSection>> {
        let sections = self
            .query_all(
                schema::select_section_by_key(active_only(visibility)),
                vec![Value::from(key.to_string())],
                row_to_section,
                "ContentSection",
            )
            .await?;
        Ok(sections.into_iter().next())
    }

    async fn create_section(&self, section: &ContentSection) -> Result<()> {
        let params = vec![
            Value::from(section.id.to_string()),
            Value::from(section.key.clone()),
            Value::from(section.title.clone()),
            Value::from(section.content.clone()),
            Value::from(metadata_to_json(&section.metadata)?),
            Value::from(section.is_active),
            Value::from(section.display_order),
            Value::from(section.image_url.clone()),
            Value::from(format_datetime(&section.created_at)),
            Value::from(format_datetime(&section.updated_at)),
        ];
        self.insert(schema::INSERT_SECTION, params, "ContentSection", section.id)
            .await
    }

    async fn update_section(&self, section: &ContentSection) -> Result<()> {
        let params = vec![
            Value::from(section.id.to_string()),
            Value::from(section.key.clone()),
            Value::from(section.title.clone()),
            Value::from(section.content.clone()),
            Value::from(metadata_to_json(&section.metadata)?),
            Value::from(section.is_active),
            Value::from(section.display_order),
            Value::from(section.image_url.clone()),
            Value::from(format_datetime(&section.updated_at)),
        ];
        self.modify_one(schema::UPDATE_SECTION, params, "ContentSection", section.id)
            .await
    }

    async fn delete_section(&self, id: Uuid) -> Result<()> {
        // Items go with it through ON DELETE CASCADE.
        self.modify_one(
            schema::DELETE_SECTION,
            vec![Value::from(id.to_string())],
            "ContentSection",
            id,
        )
        .await
    }
}

// ============================================================================
// ItemRepository implementation
// ============================================================================

fn item_params(item: &ContentItem, include_created_at: bool) -> Result<Vec<Value>> {
    let mut params = vec![
        Value::from(item.id.to_string()),
        Value::from(item.section_id.to_string()),
        Value::from(item.title.clone()),
        Value::from(item.description.clone()),
        Value::from(item.image_url.clone()),
        Value::from(item.link_url.clone()),
        Value::from(metadata_to_json(&item.metadata)?),
        Value::from(item.is_active),
        Value::from(item.display_order),
    ];
    if include_created_at {
        params.push(Value::from(format_datetime(&item.created_at)));
    }
    params.push(Value::from(format_datetime(&item.updated_at)));
    Ok(params)
}

#[async_trait]
impl ItemRepository for SqliteRepository {
    async fn list_items(&self, visibility: Visibility) -> Result<Vec<ContentItem>> {
        self.query_all(
            schema::select_items(active_only(visibility)),
            Vec::new(),
            row_to_item,
            "ContentItem",
        )
        .await
    }

    async fn list_items_by_section(
        &self,
        section_id: Uuid,
        visibility: Visibility,
    ) -> Result<Vec<ContentItem>> {
        self.query_all(
            schema::select_items_by_section(active_only(visibility)),
            vec![Value::from(section_id.to_string())],
            row_to_item,
            "ContentItem",
        )
        .await
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<ContentItem>> {
        self.query_by_id(schema::select_item_by_id(), id, row_to_item, "ContentItem")
            .await
    }

    async fn create_item(&self, item: &ContentItem) -> Result<()> {
        self.insert(schema::INSERT_ITEM, item_params(item, true)?, "ContentItem", item.id)
            .await
    }

    async fn update_item(&self, item: &ContentItem) -> Result<()> {
        self.modify_one(
            schema::UPDATE_ITEM,
            item_params(item, false)?,
            "ContentItem",
            item.id,
        )
        .await
    }

    async fn delete_item(&self, id: Uuid) -> Result<()> {
        self.modify_one(
            schema::DELETE_ITEM,
            vec![Value::from(id.to_string())],
            "ContentItem",
            id,
        )
        .await
    }
}

// ============================================================================
// TestimonialRepository implementation
// ============================================================================

fn testimonial_params(testimonial: &Testimonial, include_created_at: bool) -> Vec<Value> {
    let mut params = vec![
        Value::from(testimonial.id.to_string()),
        Value::from(testimonial.name.clone()),
        Value::from(testimonial.position.clone()),
        Value::from(testimonial.company.clone()),
        Value::from(testimonial.content.clone()),
        Value::from(testimonial.image_url.clone()),
        Value::from(testimonial.rating),
        Value::from(testimonial.is_active),
        Value::from(testimonial.display_order),
    ];
    if include_created_at {
        params.push(Value::from(format_datetime(&testimonial.created_at)));
    }
    params.push(Value::from(format_datetime(&testimonial.updated_at)));
    params
}

#[async_trait]
impl TestimonialRepository for SqliteRepository {
    async fn list_testimonials(&self, visibility: Visibility) -> Result<Vec<Testimonial>> {
        self.query_all(
            schema::select_testimonials(active_only(visibility)),
            Vec::new(),
            row_to_testimonial,
            "Testimonial",
        )
        .await
    }

    async fn get_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>> {
        self.query_by_id(
            schema::select_testimonial_by_id(),
            id,
            row_to_testimonial,
            "Testimonial",
        )
        .await
    }

    async fn create_testimonial(&self, testimonial: &Testimonial) -> Result<()> {
        self.insert(
            schema::INSERT_TESTIMONIAL,
            testimonial_params(testimonial, true),
            "Testimonial",
            testimonial.id,
        )
        .await
    }

    async fn update_testimonial(&self, testimonial: &Testimonial) -> Result<()> {
        self.modify_one(
            schema::UPDATE_TESTIMONIAL,
            testimonial_params(testimonial, false),
            "Testimonial",
            testimonial.id,
        )
        .await
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<()> {
        self.modify_one(
            schema::DELETE_TESTIMONIAL,
            vec![Value::from(id.to_string())],
            "Testimonial",
            id,
        )
        .await
    }
}

// ============================================================================
// FaqRepository implementation
// ============================================================================

fn faq_params(faq: &Faq, include_created_at: bool) -> Vec<Value> {
    let mut params = vec![
        Value::from(faq.id.to_string()),
        Value::from(faq.question.clone()),
        Value::from(faq.answer.clone()),
        Value::from(faq.category.clone()),
        Value::from(faq.is_active),
        Value::from(faq.display_order),
    ];
    if include_created_at {
        params.push(Value::from(format_datetime(&faq.created_at)));
    }
    params.push(Value::from(format_datetime(&faq.updated_at)));
    params
}

#[async_trait]
impl FaqRepository for SqliteRepository {
    async fn list_faqs(&self, visibility: Visibility) -> Result<Vec<Faq>> {
        self.query_all(
            schema::select_faqs(active_only(visibility)),
            Vec::new(),
            row_to_faq,
            "Faq",
        )
        .await
    }

    async fn get_faq(&self, id: Uuid) -> Result<Option<Faq>> {
        self.query_by_id(schema::select_faq_by_id(), id, row_to_faq, "Faq")
            .await
    }

    async fn create_faq(&self, faq: &Faq) -> Result<()> {
        self.insert(schema::INSERT_FAQ, faq_params(faq, true), "Faq", faq.id)
            .await
    }

    async fn update_faq(&self, faq: &Faq) -> Result<()> {
        self.modify_one(schema::UPDATE_FAQ, faq_params(faq, false), "Faq", faq.id)
            .await
    }

    async fn delete_faq(&self, id: Uuid) -> Result<()> {
        self.modify_one(
            schema::DELETE_FAQ,
            vec![Value::from(id.to_string())],
            "Faq",
            id,
        )
        .await
    }
}
