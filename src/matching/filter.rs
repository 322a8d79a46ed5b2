//! Narrowing of upstream entries to the ones a user most likely meant.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::slug::build_slug;
use crate::config::DEFAULT_MAX_POSTCODE_LENGTH;
use crate::models::{GazetteerEntry, RawEntry, ResolvedEntry};

/// Outward code fragment: one or two letters, a digit, then an optional
/// letter or digit ("W1", "M60", "SW1A").
static PARTIAL_POSTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,2}[0-9][A-Z0-9]?$").unwrap());

/// Uppercase `text` and keep only ASCII letters and digits.
pub fn match_key(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Whether `text` looks like the start of a UK postcode.
pub fn is_partial_postcode(text: &str) -> bool {
    PARTIAL_POSTCODE.is_match(&text.to_uppercase())
}

/// Substring and postcode matching over a deduplicated result set.
#[derive(Debug, Clone, Copy)]
pub struct MatchFilter {
    max_postcode_length: usize,
}

impl Default for MatchFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POSTCODE_LENGTH)
    }
}

impl MatchFilter {
    pub fn new(max_postcode_length: usize) -> Self {
        Self {
            max_postcode_length,
        }
    }

    /// Select and slug the entries matching a query.
    ///
    /// `location_name_or_postcode` is the trimmed text as typed;
    /// `normalized_upper_query` is its uppercase form.
    ///
    /// A short partial postcode returns only the first upstream entry,
    /// renamed after its alternate name (or the postcode itself). Anything
    /// else keeps the entries whose primary name contains the query, or whose
    /// primary or alternate name is contained in it.
    pub fn filter(
        &self,
        entries: &[RawEntry],
        location_name_or_postcode: &str,
        normalized_upper_query: &str,
    ) -> Vec<ResolvedEntry> {
        if let Some(first) = entries.first() {
            if self.is_postcode_query(location_name_or_postcode) {
                debug!(
                    "'{}' treated as partial postcode, keeping first of {} entries",
                    location_name_or_postcode,
                    entries.len()
                );
                return postcode_entry(&first.gazetteer_entry, location_name_or_postcode)
                    .into_iter()
                    .collect();
            }
        }

        let key = match_key(normalized_upper_query);

        let matches: Vec<ResolvedEntry> = entries
            .iter()
            .map(|raw| &raw.gazetteer_entry)
            .filter(|entry| names_match(entry, &key))
            .filter_map(|entry| {
                let slug = build_slug(entry.display_name(), entry.region());
                resolved(entry.clone(), slug)
            })
            .collect();

        debug!(
            "{} of {} entries matched '{}'",
            matches.len(),
            entries.len(),
            key
        );
        matches
    }

    fn is_postcode_query(&self, location_name_or_postcode: &str) -> bool {
        is_partial_postcode(location_name_or_postcode)
            && location_name_or_postcode.chars().count() <= self.max_postcode_length
    }
}

/// The primary name is tested both ways round; the alternate name only as a
/// part of the query.
fn names_match(entry: &GazetteerEntry, key: &str) -> bool {
    let name1 = match_key(&entry.name1);
    let name2 = entry.name2.as_deref().map(match_key);

    name1.contains(key)
        || key.contains(name1.as_str())
        || name2.is_some_and(|n| key.contains(n.as_str()))
}

fn postcode_entry(
    first: &GazetteerEntry,
    location_name_or_postcode: &str,
) -> Option<ResolvedEntry> {
    let mut entry = first.clone();
    entry.name1 = match entry.name2.as_deref().filter(|n| !n.is_empty()) {
        Some(name2) => name2.to_string(),
        None => location_name_or_postcode.to_uppercase(),
    };

    let slug = build_slug(&entry.name1, entry.region());
    resolved(entry, slug)
}

fn resolved(entry: GazetteerEntry, slug: String) -> Option<ResolvedEntry> {
    if slug.is_empty() {
        debug!("Dropping '{}': nothing to build a slug from", entry.name1);
        return None;
    }
    Some(ResolvedEntry::new(entry, slug))
}
