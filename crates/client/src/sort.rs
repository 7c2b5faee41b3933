//! Listing order: last name, then creation time

use rolodex_core::Contact;
use std::cmp::Ordering;

/// `None` after every `Some`
fn none_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two contacts for display
pub fn compare(a: &Contact, b: &Contact) -> Ordering {
    none_last(&a.last, &b.last).then_with(|| none_last(&a.created_at, &b.created_at))
}

/// Stable sort by last name, ties by creation time
pub fn sort_contacts(contacts: &mut [Contact]) {
    contacts.sort_by(compare);
}
