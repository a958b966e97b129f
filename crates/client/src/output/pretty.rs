//! Pretty output formatting.

use sitecontent_core::content::{
    AllContent, ContentItem, ContentSection, EventDetails, EventStats, Faq, SectionContent,
    Testimonial,
};

use crate::console::slots::SlotView;
use crate::console::{CleanupReport, SlotOutcome};

fn active_marker(is_active: bool) -> &'static str {
    if is_active {
        ""
    } else {
        " [inactive]"
    }
}

fn format_list<T>(heading: &str, rows: &[T], format: impl Fn(&T) -> String) -> String {
    if rows.is_empty() {
        return format!("No {} found.", heading.to_lowercase());
    }
    let mut output = format!("{} ({})\n", heading, rows.len());
    output.push_str(&"-".repeat(40));
    for row in rows {
        output.push_str(&format!("\n{}", format(row)));
        output.push('\n');
    }
    output
}

/// Format a section for display.
pub fn format_section(section: &ContentSection) -> String {
    let mut output = format!(
        "{} ({}){}\n  ID: {}\n  Order: {}",
        section.title,
        section.key,
        active_marker(section.is_active),
        section.id,
        section.display_order
    );
    if let Some(content) = &section.content {
        output.push_str(&format!("\n  Content: {}", content));
    }
    if let Some(image) = &section.image_url {
        output.push_str(&format!("\n  Image: {}", image));
    }
    output
}

pub fn format_sections(sections: &[ContentSection]) -> String {
    format_list("SECTIONS", sections, format_section)
}

/// Format an item for display.
pub fn format_item(item: &ContentItem) -> String {
    let mut output = format!(
        "{}{}\n  ID: {}\n  Section: {}\n  Order: {}",
        item.title,
        active_marker(item.is_active),
        item.id,
        item.section_id,
        item.display_order
    );
    if let Some(desc) = &item.description {
        output.push_str(&format!("\n  Description: {}", desc));
    }
    if let Some(image) = &item.image_url {
        output.push_str(&format!("\n  Image: {}", image));
    }
    if let Some(link) = &item.link_url {
        output.push_str(&format!("\n  Link: {}", link));
    }
    output
}

pub fn format_items(items: &[ContentItem]) -> String {
    format_list("ITEMS", items, format_item)
}

/// Format a testimonial for display.
pub fn format_testimonial(testimonial: &Testimonial) -> String {
    let mut output = format!(
        "{}{}\n  ID: {}",
        testimonial.name,
        active_marker(testimonial.is_active),
        testimonial.id
    );
    let role = match (&testimonial.position, &testimonial.company) {
        (Some(position), Some(company)) => Some(format!("{position}, {company}")),
        (Some(position), None) => Some(position.clone()),
        (None, Some(company)) => Some(company.clone()),
        (None, None) => None,
    };
    if let Some(role) = role {
        output.push_str(&format!("\n  Role: {}", role));
    }
    if let Some(rating) = testimonial.rating {
        output.push_str(&format!("\n  Rating: {}/5", rating));
    }
    output.push_str(&format!("\n  \"{}\"", testimonial.content));
    output
}

pub fn format_testimonials(testimonials: &[Testimonial]) -> String {
    format_list("TESTIMONIALS", testimonials, format_testimonial)
}

/// Format a FAQ for display.
pub fn format_faq(faq: &Faq) -> String {
    let mut output = format!(
        "Q: {}{}\n  ID: {}\n  A: {}",
        faq.question,
        active_marker(faq.is_active),
        faq.id,
        faq.answer
    );
    if let Some(category) = &faq.category {
        output.push_str(&format!("\n  Category: {}", category));
    }
    output
}

pub fn format_faqs(faqs: &[Faq]) -> String {
    format_list("FAQS", faqs, format_faq)
}

/// Format every collection.
pub fn format_all_content(content: &AllContent) -> String {
    [
        format_sections(&content.sections),
        format_items(&content.items),
        format_testimonials(&content.testimonials),
        format_faqs(&content.faqs),
    ]
    .join("\n\n")
}

/// Format the content of one section key.
pub fn format_section_content(content: &SectionContent) -> String {
    match content {
        SectionContent::Testimonials { testimonials } => format_testimonials(testimonials),
        SectionContent::Faqs { faqs } => format_faqs(faqs),
        SectionContent::Section { section, items } => {
            let header = section
                .as_ref()
                .map(format_section)
                .unwrap_or_else(|| "Section not found.".to_string());
            format!("{}\n\n{}", header, format_items(items))
        }
    }
}

/// Format the slot table of a section.
pub fn format_slots(slots: &[SlotView]) -> String {
    let mut output = format!("SLOTS ({})\n", slots.len());
    output.push_str(&"-".repeat(40));
    for view in slots {
        match &view.item {
            Some(item) => {
                output.push_str(&format!("\n{}. {}\n  ID: {}", view.slot, item.title, item.id));
                if let Some(image) = &item.image_url {
                    output.push_str(&format!("\n  Image: {}", image));
                }
            }
            None => output.push_str(&format!("\n{}. (not created)", view.slot)),
        }
    }
    output
}

pub fn format_cleanup(cleanup: &CleanupReport) -> Option<String> {
    match cleanup {
        CleanupReport::Skipped => None,
        CleanupReport::Deleted { url } => Some(format!("Deleted previous image {}", url)),
        CleanupReport::Failed { url, error } => Some(format!(
            "Warning: previous image {} was not deleted: {}",
            url, error
        )),
    }
}

/// Format an event with its details.
pub fn format_event(event: &ContentItem) -> String {
    let details = EventDetails::from_metadata(&event.metadata);
    let mut output = format_item(event);
    let when = match (&details.date, &details.time) {
        (Some(date), Some(time)) => Some(format!("{} {}", date, time)),
        (Some(date), None) => Some(date.clone()),
        (None, Some(time)) => Some(time.clone()),
        (None, None) => None,
    };
    let lines = [
        ("When", when),
        ("Location", details.location),
        ("Category", details.category),
        ("Organizer", details.organizer),
        ("Contact", details.contact_email),
        ("Guests", details.guests),
    ];
    for (label, value) in lines {
        if let Some(value) = value {
            output.push_str(&format!("\n  {}: {}", label, value));
        }
    }
    output
}

/// Format a filtered event list under the section's counts.
pub fn format_events(events: &[&ContentItem], stats: &EventStats) -> String {
    let summary = format!(
        "Total: {}  Active: {}  Inactive: {}",
        stats.total, stats.active, stats.inactive
    );
    let list = format_list("EVENTS", events, |event| format_event(event));
    format!("{}\n{}", summary, list)
}

/// Format the outcome of a slot save.
pub fn format_slot_outcome(outcome: &SlotOutcome) -> String {
    match outcome {
        SlotOutcome::Saved {
            slot,
            item,
            created,
            cleanup,
        } => {
            let verb = if *created { "Created" } else { "Updated" };
            let mut output = format!("{} slot {}:\n{}", verb, slot, format_item(item));
            if let Some(line) = format_cleanup(cleanup) {
                output.push_str(&format!("\n{}", line));
            }
            output
        }
        SlotOutcome::Failed { slot, error } => {
            format!("Slot {} was not saved: {}", slot, error.source)
        }
    }
}
