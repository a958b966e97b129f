mod error;
mod events;
mod mock_data;
mod requests;
mod responses;
mod slots;
mod sorting;
mod types;

pub use error::{FieldError, ValidationError};
pub use events::{EventDetails, EventFilter, EventStats, StatusFilter, EVENTS_SECTION_KEY};
pub use mock_data::{generate_demo_content, ABOUT_FEATURE_SLOTS};
pub use requests::{FaqPayload, ItemPayload, SectionPayload, TestimonialPayload};
pub use responses::{AllContent, ApiResponse, SectionContent, SectionKey};
pub use slots::SlotMap;
pub use sorting::{filter_active, listing_order, sort_for_listing};
pub use types::{ContentItem, ContentSection, Faq, Metadata, Ordered, Testimonial};
