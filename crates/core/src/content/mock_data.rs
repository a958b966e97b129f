//! Demo content for seeding a fresh store.
//!
//! Pure functions with no side effects. The server uses them to seed the
//! in-memory backend and, on request, an empty SQLite database.

use serde_json::json;

use super::responses::AllContent;
use super::types::{ContentItem, ContentSection, Faq, Metadata, Testimonial};

/// Number of feature boxes on the about page.
pub const ABOUT_FEATURE_SLOTS: u32 = 4;

/// Generate the demo site: hero, about (with its four feature boxes),
/// features, events, one testimonial and one FAQ.
///
/// # Example
///
/// ```
/// use sitecontent_core::content::generate_demo_content;
///
/// let content = generate_demo_content();
/// let about = content.sections.iter().find(|s| s.key == "about").unwrap();
/// let boxes = content.items.iter().filter(|i| i.section_id == about.id).count();
///
/// assert_eq!(boxes, 4);
/// ```
pub fn generate_demo_content() -> AllContent {
    let hero = ContentSection::new("hero", "Welcome to the Summer Trade Fair")
        .with_content("Three days of exhibitors, talks and workshops.")
        .with_display_order(0);

    let mut about_meta = Metadata::new();
    about_meta.insert(
        "mission".into(),
        json!("Connecting local makers with the people who use their work."),
    );
    let about = ContentSection::new("about", "About the Fair")
        .with_content("Held every June since 2009.")
        .with_metadata(about_meta)
        .with_display_order(1);

    let features = ContentSection::new("features", "What to Expect")
        .with_content("Highlights from this year's programme.")
        .with_display_order(2);

    let events = ContentSection::new("events", "Upcoming Events").with_display_order(3);

    let feature_boxes = [
        ("Exhibitors", "Over 200 stands across two halls."),
        ("Workshops", "Hands-on sessions run by the exhibitors."),
        ("Talks", "Short talks on the main stage every hour."),
        ("Food Court", "Local vendors open all day."),
    ];

    let mut items: Vec<ContentItem> = feature_boxes
        .iter()
        .zip(1..)
        .map(|((title, description), order)| {
            ContentItem::new(about.id, *title)
                .with_description(*description)
                .with_display_order(order)
        })
        .collect();

    items.push(
        ContentItem::new(features.id, "Free entry")
            .with_description("No tickets needed on the opening day.")
            .with_display_order(0),
    );
    items.push(
        ContentItem::new(features.id, "Family area")
            .with_description("Supervised activities for children.")
            .with_display_order(1),
    );
    items.push(
        ContentItem::new(events.id, "Opening Ceremony")
            .with_description("Friday 10:00, main stage.")
            .with_display_order(0),
    );

    let mut testimonial = Testimonial::new(
        "Ana Torres",
        "We met half of our new stockists at the fair.",
    );
    testimonial.position = Some("Founder".to_string());
    testimonial.company = Some("Torres Ceramics".to_string());
    testimonial.rating = Some(5);

    let mut faq = Faq::new(
        "Do I need a ticket?",
        "Entry is free on Friday. Saturday and Sunday tickets are sold at the door.",
    );
    faq.category = Some("tickets".to_string());

    AllContent {
        sections: vec![hero, about, features, events],
        items,
        testimonials: vec![testimonial],
        faqs: vec![faq],
    }
}
