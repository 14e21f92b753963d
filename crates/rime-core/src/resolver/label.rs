//! Label parsing and remote title/author matching.

use crate::ports::WorkSummary;

/// Separators between title and author in a display label. The earliest
/// occurrence of any of them wins.
const SEPARATORS: [&str; 2] = [" - ", " – "];

/// Split `"Title - Author"` into its parts. Without a separator the whole
/// label is the title and the author is empty.
pub fn split_label(label: &str) -> (String, String) {
    let hit = SEPARATORS
        .iter()
        .filter_map(|sep| label.find(sep).map(|at| (at, sep.len())))
        .min_by_key(|(at, _)| *at);

    match hit {
        Some((at, len)) => (
            label[..at].trim().to_string(),
            label[at + len..].trim().to_string(),
        ),
        None => (label.trim().to_string(), String::new()),
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// First work in listing order whose title matches, and whose author matches
/// too when one is given.
pub fn find_work<'a>(
    works: &'a [WorkSummary],
    title: &str,
    author: &str,
) -> Option<&'a WorkSummary> {
    let check_author = !author.trim().is_empty();
    works
        .iter()
        .find(|w| same_name(&w.title, title) && (!check_author || same_name(&w.author, author)))
}
