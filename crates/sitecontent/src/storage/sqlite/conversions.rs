//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

use sitecontent_core::content::{ContentItem, ContentSection, Faq, Metadata, Testimonial};
use sitecontent_core::storage::RepositoryError;

// ============================================================================
// Section conversions
// ============================================================================

/// Convert a SQLite row to a ContentSection.
///
/// Expected columns: id, key, title, content, metadata, is_active,
/// display_order, image_url, created_at, updated_at
pub fn row_to_section(row: &Row) -> rusqlite::Result<ContentSection> {
    let id: String = row.get(0)?;
    let metadata: String = row.get(4)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(ContentSection {
        id: parse_uuid(&id)?,
        key: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        metadata: parse_metadata(&metadata)?,
        is_active: row.get(5)?,
        display_order: row.get(6)?,
        image_url: row.get(7)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ============================================================================
// Item conversions
// ============================================================================

/// Convert a SQLite row to a ContentItem.
///
/// Expected columns: id, section_id, title, description, image_url,
/// link_url, metadata, is_active, display_order, created_at, updated_at
pub fn row_to_item(row: &Row) -> rusqlite::Result<ContentItem> {
    let id: String = row.get(0)?;
    let section_id: String = row.get(1)?;
    let metadata: String = row.get(6)?;
    let created_at: String = row.get(9)?;
    let updated_at: String = row.get(10)?;

    Ok(ContentItem {
        id: parse_uuid(&id)?,
        section_id: parse_uuid(&section_id)?,
        title: row.get(2)?,
        description: row.get(3)?,
        image_url: row.get(4)?,
        link_url: row.get(5)?,
        metadata: parse_metadata(&metadata)?,
        is_active: row.get(7)?,
        display_order: row.get(8)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ============================================================================
// Testimonial and FAQ conversions
// ============================================================================

/// Convert a SQLite row to a Testimonial.
///
/// Expected columns: id, name, position, company, content, image_url,
/// rating, is_active, display_order, created_at, updated_at
pub fn row_to_testimonial(row: &Row) -> rusqlite::Result<Testimonial> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(9)?;
    let updated_at: String = row.get(10)?;

    Ok(Testimonial {
        id: parse_uuid(&id)?,
        name: row.get(1)?,
        position: row.get(2)?,
        company: row.get(3)?,
        content: row.get(4)?,
        image_url: row.get(5)?,
        rating: row.get(6)?,
        is_active: row.get(7)?,
        display_order: row.get(8)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a Faq.
///
/// Expected columns: id, question, answer, category, is_active,
/// display_order, created_at, updated_at
pub fn row_to_faq(row: &Row) -> rusqlite::Result<Faq> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Faq {
        id: parse_uuid(&id)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        category: row.get(3)?,
        is_active: row.get(4)?,
        display_order: row.get(5)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Serialize metadata to a JSON string.
pub fn metadata_to_json(metadata: &Metadata) -> Result<String, RepositoryError> {
    serde_json::to_string(metadata).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn parse_metadata(json: &str) -> rusqlite::Result<Metadata> {
    serde_json::from_str(json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Always nanosecond precision with a `Z` suffix, so stored values have a
/// fixed width and `ORDER BY created_at` matches chronological order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(5);

        let a = format_datetime(&whole);
        let b = format_datetime(&fractional);

        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert!(a.ends_with('Z'));
    }

    #[test]
    fn test_datetime_round_trip() {
        let now = Utc::now();
        assert_eq!(parse_datetime(&format_datetime(&now)).unwrap(), now);
    }

    #[test]
    fn test_metadata_json() {
        let mut metadata = Metadata::new();
        metadata.insert("mission".into(), serde_json::json!("Connect"));

        let json = metadata_to_json(&metadata).unwrap();
        assert_eq!(json, r#"{"mission":"Connect"}"#);
        assert_eq!(parse_metadata(&json).unwrap(), metadata);
    }

    #[test]
    fn test_invalid_uuid_is_conversion_failure() {
        assert!(matches!(
            parse_uuid("not-a-uuid"),
            Err(rusqlite::Error::FromSqlConversionFailure(..))
        ));
    }
}
