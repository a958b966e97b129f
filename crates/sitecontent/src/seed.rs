//! Demo content seeding.

use sitecontent_core::content::generate_demo_content;
use sitecontent_core::storage::{RepositoryError, Visibility};

use crate::store::ContentStore;

/// Writes the demo content if the store has no sections yet.
///
/// Returns true if anything was written.
pub async fn seed_if_empty(store: &dyn ContentStore) -> Result<bool, RepositoryError> {
    if !store.list_sections(Visibility::All).await?.is_empty() {
        return Ok(false);
    }

    let content = generate_demo_content();
    for section in &content.sections {
        store.create_section(section).await?;
    }
    for item in &content.items {
        store.create_item(item).await?;
    }
    for testimonial in &content.testimonials {
        store.create_testimonial(testimonial).await?;
    }
    for faq in &content.faqs {
        store.create_faq(faq).await?;
    }

    tracing::info!(
        sections = content.sections.len(),
        items = content.items.len(),
        "Seeded demo content"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecontent_core::storage::ItemRepository;
    use crate::storage::inmemory::InMemoryRepository;

    #[tokio::test]
    async fn test_seed_only_empty_store() {
        let repo = InMemoryRepository::new();

        assert!(seed_if_empty(&repo).await.unwrap());
        assert!(!seed_if_empty(&repo).await.unwrap());

        let items = repo.list_items(Visibility::All).await.unwrap();
        assert_eq!(items.len(), 7);
    }
}
