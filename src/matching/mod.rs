//! Deduplication, matching and slugging of gazetteer results.

mod dedupe;
mod filter;
mod slug;

pub use dedupe::dedupe;
pub use filter::{is_partial_postcode, match_key, MatchFilter};
pub use slug::build_slug;
