//! Whole-word full-text search over the record collection.
//!
//! A query matches as a case-insensitive, word-boundary-anchored pattern
//! against the body, the content-warning summary, each poll option's label,
//! and each attachment's alt text; any field match selects the record. The
//! query itself is escaped and treated as literal text, so punctuation in a
//! query never becomes pattern syntax. Matching is field-null-safe: records
//! without a summary, poll, or attachments simply contribute no match from
//! those fields.

use regex::{Regex, RegexBuilder};

use crate::models::Toot;

/// Filter `records` down to those matching `query` as a whole word.
///
/// The returned subset carries no ordering promise; callers re-establish
/// display order via `published`. An empty or whitespace-only query matches
/// nothing: "no query" is a view-resolution concern, not a search one.
pub fn search<'a, I>(records: I, query: &str) -> Vec<Toot>
where
    I: IntoIterator<Item = &'a Toot>,
{
    let Some(pattern) = word_pattern(query) else {
        return Vec::new();
    };
    records.into_iter().filter(|toot| matches(toot, &pattern)).cloned().collect()
}

/// Word-boundary-anchored, case-insensitive pattern for a literal query.
/// `None` for queries with no searchable text.
fn word_pattern(query: &str) -> Option<Regex> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    let pattern = format!(r"\b{}\b", regex::escape(trimmed));
    Some(
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .expect("escaped literal text is a valid pattern"),
    )
}

fn matches(toot: &Toot, pattern: &Regex) -> bool {
    pattern.is_match(&toot.content)
        || toot.summary.as_deref().is_some_and(|summary| pattern.is_match(summary))
        || toot
            .poll
            .as_ref()
            .is_some_and(|poll| poll.options.iter().any(|option| pattern.is_match(&option.label)))
        || toot
            .attachments
            .iter()
            .any(|attachment| attachment.alt_text.as_deref().is_some_and(|alt| pattern.is_match(alt)))
}
