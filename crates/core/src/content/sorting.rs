use std::cmp::Ordering;

use super::types::Ordered;

/// Compares two rows in listing order: `display_order` ascending, then
/// `created_at` descending (newest first).
pub fn listing_order<T: Ordered>(a: &T, b: &T) -> Ordering {
    a.display_order()
        .cmp(&b.display_order())
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

/// Sorts rows in listing order. The sort is stable, so rows that tie on
/// both keys keep their relative position.
pub fn sort_for_listing<T: Ordered>(rows: &mut [T]) {
    rows.sort_by(listing_order);
}

/// Keeps only active rows.
pub fn filter_active<T: Ordered>(rows: Vec<T>) -> Vec<T> {
    rows.into_iter().filter(|row| row.is_active()).collect()
}
