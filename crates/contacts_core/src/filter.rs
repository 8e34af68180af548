use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::Contact;

/// Derives the visible list: filtered by `query` when it is non-empty, always
/// sorted by last name. The source slice is left untouched.
pub fn visible_contacts<'a>(all: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let mut visible: Vec<&Contact> = if query.is_empty() {
        all.iter().collect()
    } else {
        let needle = query.to_lowercase();
        all.iter().filter(|contact| matches(contact, &needle)).collect()
    };
    // Stable, so equal last names keep fetch order.
    visible.sort_by(|a, b| compare_last_names(&a.last_name, &b.last_name));
    visible
}

fn matches(contact: &Contact, needle: &str) -> bool {
    contact.full_name().to_lowercase().contains(needle)
        || contact
            .emails
            .iter()
            .any(|entry| entry.email.to_lowercase().contains(needle))
}

/// Dictionary-style ordering. Letters compare by their base form first, so
/// accents and case only break ties: unaccented before accented, then
/// lowercase before uppercase.
pub fn compare_last_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| compare_case(a, b))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|&ch| !is_combining_mark(ch))
        .flat_map(char::to_lowercase)
}

fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

fn compare_case(a: &str, b: &str) -> Ordering {
    a.nfd()
        .zip(b.nfd())
        .find(|(x, y)| x != y)
        .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        })
        .unwrap_or_else(|| a.nfd().count().cmp(&b.nfd().count()))
}
