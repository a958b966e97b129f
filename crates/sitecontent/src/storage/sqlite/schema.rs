//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Listing queries order rows by `display_order` ascending
//! and `created_at` descending; timestamps are stored as fixed-width RFC 3339
//! strings so they sort lexically.

/// Connection settings applied before the schema.
pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Content sections table
CREATE TABLE IF NOT EXISTS content_sections (
    id TEXT PRIMARY KEY,
    key TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT,
    metadata TEXT NOT NULL DEFAULT '{}',
    is_active INTEGER NOT NULL DEFAULT 1,
    display_order INTEGER NOT NULL DEFAULT 0,
    image_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Content items table
CREATE TABLE IF NOT EXISTS content_items (
    id TEXT PRIMARY KEY,
    section_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    image_url TEXT,
    link_url TEXT,
    metadata TEXT NOT NULL DEFAULT '{}',
    is_active INTEGER NOT NULL DEFAULT 1,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (section_id) REFERENCES content_sections(id) ON DELETE CASCADE
);

-- Testimonials table
CREATE TABLE IF NOT EXISTS testimonials (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    position TEXT,
    company TEXT,
    content TEXT NOT NULL,
    image_url TEXT,
    rating INTEGER,
    is_active INTEGER NOT NULL DEFAULT 1,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- FAQs table
CREATE TABLE IF NOT EXISTS faqs (
    id TEXT PRIMARY KEY,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    category TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_content_sections_key ON content_sections(key);
CREATE INDEX IF NOT EXISTS idx_content_items_section_id ON content_items(section_id);
"#;

// Section queries
const SECTION_COLUMNS: &str =
    "id, key, title, content, metadata, is_active, display_order, image_url, created_at, updated_at";

pub const INSERT_SECTION: &str = r#"
INSERT INTO content_sections (id, key, title, content, metadata, is_active, display_order, image_url, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub fn select_sections(active_only: bool) -> String {
    listing_query(SECTION_COLUMNS, "content_sections", None, active_only)
}

pub fn select_section_by_key(active_only: bool) -> String {
    listing_query(SECTION_COLUMNS, "content_sections", Some("key = ?1"), active_only)
}

pub fn select_section_by_id() -> String {
    format!("SELECT {SECTION_COLUMNS} FROM content_sections WHERE id = ?1")
}

pub const UPDATE_SECTION: &str = r#"
UPDATE content_sections
SET key = ?2, title = ?3, content = ?4, metadata = ?5, is_active = ?6, display_order = ?7, image_url = ?8, updated_at = ?9
WHERE id = ?1
"#;

pub const DELETE_SECTION: &str = r#"
DELETE FROM content_sections
WHERE id = ?1
"#;

// Item queries
const ITEM_COLUMNS: &str = "id, section_id, title, description, image_url, link_url, metadata, is_active, display_order, created_at, updated_at";

pub const INSERT_ITEM: &str = r#"
INSERT INTO content_items (id, section_id, title, description, image_url, link_url, metadata, is_active, display_order, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
"#;

pub fn select_items(active_only: bool) -> String {
    listing_query(ITEM_COLUMNS, "content_items", None, active_only)
}

pub fn select_items_by_section(active_only: bool) -> String {
    listing_query(ITEM_COLUMNS, "content_items", Some("section_id = ?1"), active_only)
}

pub fn select_item_by_id() -> String {
    format!("SELECT {ITEM_COLUMNS} FROM content_items WHERE id = ?1")
}

pub const UPDATE_ITEM: &str = r#"
UPDATE content_items
SET section_id = ?2, title = ?3, description = ?4, image_url = ?5, link_url = ?6, metadata = ?7, is_active = ?8, display_order = ?9, updated_at = ?10
WHERE id = ?1
"#;

pub const DELETE_ITEM: &str = r#"
DELETE FROM content_items
WHERE id = ?1
"#;

// Testimonial queries
const TESTIMONIAL_COLUMNS: &str = "id, name, position, company, content, image_url, rating, is_active, display_order, created_at, updated_at";

pub const INSERT_TESTIMONIAL: &str = r#"
INSERT INTO testimonials (id, name, position, company, content, image_url, rating, is_active, display_order, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
"#;

pub fn select_testimonials(active_only: bool) -> String {
    listing_query(TESTIMONIAL_COLUMNS, "testimonials", None, active_only)
}

pub fn select_testimonial_by_id() -> String {
    format!("SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = ?1")
}

pub const UPDATE_TESTIMONIAL: &str = r#"
UPDATE testimonials
SET name = ?2, position = ?3, company = ?4, content = ?5, image_url = ?6, rating = ?7, is_active = ?8, display_order = ?9, updated_at = ?10
WHERE id = ?1
"#;

pub const DELETE_TESTIMONIAL: &str = r#"
DELETE FROM testimonials
WHERE id = ?1
"#;

// FAQ queries
const FAQ_COLUMNS: &str =
    "id, question, answer, category, is_active, display_order, created_at, updated_at";

pub const INSERT_FAQ: &str = r#"
INSERT INTO faqs (id, question, answer, category, is_active, display_order, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub fn select_faqs(active_only: bool) -> String {
    listing_query(FAQ_COLUMNS, "faqs", None, active_only)
}

pub fn select_faq_by_id() -> String {
    format!("SELECT {FAQ_COLUMNS} FROM faqs WHERE id = ?1")
}

pub const UPDATE_FAQ: &str = r#"
UPDATE faqs
SET question = ?2, answer = ?3, category = ?4, is_active = ?5, display_order = ?6, updated_at = ?7
WHERE id = ?1
"#;

pub const DELETE_FAQ: &str = r#"
DELETE FROM faqs
WHERE id = ?1
"#;

/// Builds a listing query with the shared ordering.
fn listing_query(columns: &str, table: &str, filter: Option<&str>, active_only: bool) -> String {
    let mut conditions = Vec::new();
    if let Some(filter) = filter {
        conditions.push(filter);
    }
    if active_only {
        conditions.push("is_active = 1");
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    format!(
        "SELECT {columns} FROM {table}{where_clause} ORDER BY display_order ASC, created_at DESC"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS content_sections"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS content_items"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS testimonials"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS faqs"));
        assert!(CREATE_TABLES.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_listing_query_filters() {
        assert_eq!(
            select_faqs(false),
            format!("SELECT {FAQ_COLUMNS} FROM faqs ORDER BY display_order ASC, created_at DESC")
        );
        assert!(select_faqs(true).contains(" WHERE is_active = 1 ORDER BY"));
        assert!(select_items_by_section(true).contains("WHERE section_id = ?1 AND is_active = 1"));
        assert!(select_section_by_key(false).contains("WHERE key = ?1 ORDER BY"));
    }

    #[test]
    fn test_queries_contain_expected_keywords() {
        assert!(INSERT_SECTION.contains("INSERT"));
        assert!(UPDATE_SECTION.contains("UPDATE"));
        assert!(DELETE_SECTION.contains("DELETE"));
        assert!(INSERT_ITEM.contains("INSERT"));
        assert!(UPDATE_ITEM.contains("section_id = ?2"));
        assert!(DELETE_ITEM.contains("DELETE"));
        assert!(INSERT_TESTIMONIAL.contains("rating"));
        assert!(UPDATE_TESTIMONIAL.contains("UPDATE"));
        assert!(DELETE_TESTIMONIAL.contains("DELETE"));
        assert!(INSERT_FAQ.contains("INSERT"));
        assert!(UPDATE_FAQ.contains("UPDATE"));
        assert!(DELETE_FAQ.contains("DELETE"));
        assert!(select_section_by_id().contains("WHERE id = ?1"));
        assert!(select_item_by_id().contains("FROM content_items"));
        assert!(select_testimonial_by_id().contains("FROM testimonials"));
    }
}
